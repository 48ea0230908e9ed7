/// FFmpeg解码过滤器模块
/// FFmpeg decode filter module
use super::relay::RelayPublisher;
use super::types::GrayFrame;
use ez_ffmpeg::filter::frame_filter::FrameFilter;
use ez_ffmpeg::filter::frame_filter_context::FrameFilterContext;
use ez_ffmpeg::{AVMediaType, Frame};
use std::time::Instant;

/// FFmpeg解码过滤器: RTSP流 → 灰度帧 → 帧中继
///
/// AprilTag检测只需要亮度,直接提取YUV420P的Y平面,
/// 省掉整个色彩空间转换
pub struct DecodeFilter {
    relay: RelayPublisher<GrayFrame>,
    frame_id: u64,
    count: usize,
    last: Instant,
    current_fps: f64,
}

impl DecodeFilter {
    pub fn new(relay: RelayPublisher<GrayFrame>) -> Self {
        Self {
            relay,
            frame_id: 0,
            count: 0,
            last: Instant::now(),
            current_fps: 0.0,
        }
    }
}

impl FrameFilter for DecodeFilter {
    fn media_type(&self) -> AVMediaType {
        AVMediaType::AVMEDIA_TYPE_VIDEO
    }

    fn init(&mut self, _ctx: &FrameFilterContext) -> Result<(), String> {
        println!("✅ 解码线程启动");
        Ok(())
    }

    fn filter_frame(
        &mut self,
        frame: Frame,
        _ctx: &FrameFilterContext,
    ) -> Result<Option<Frame>, String> {
        // 停止信号到达: 返回错误让FFmpeg拆除整条流水线
        if !super::running() {
            return Err("收到停止信号".to_string());
        }

        unsafe {
            if frame.as_ptr().is_null() {
                return Ok(Some(frame));
            }

            let w = (*frame.as_ptr()).width as u32;
            let h = (*frame.as_ptr()).height as u32;

            self.count += 1;
            self.frame_id += 1;

            // Y平面逐行拷贝 (linesize可能大于宽度,有对齐填充)
            let data_y = (*frame.as_ptr()).data[0];
            let y_stride = (*frame.as_ptr()).linesize[0] as usize;

            let mut gray = vec![0u8; (w * h) as usize];
            let gray_ptr = gray.as_mut_ptr();
            for row in 0..h as usize {
                std::ptr::copy_nonoverlapping(
                    data_y.add(row * y_stride),
                    gray_ptr.add(row * w as usize),
                    w as usize,
                );
            }

            // 计算FPS
            if self.last.elapsed().as_secs_f64() >= 1.0 {
                let elapsed = self.last.elapsed().as_secs_f64();
                self.current_fps = self.count as f64 / elapsed;

                // 每秒打印一次解码统计
                println!(
                    "📺 解码统计: 解码{}帧 | 实际{:.1}fps",
                    self.count, self.current_fps
                );

                self.last = Instant::now();
                self.count = 0;
            }

            // 发布到帧中继: 检测线程跟不上时旧帧被覆盖,永不阻塞解码
            self.relay.publish(GrayFrame {
                data: gray,
                width: w,
                height: h,
                frame_id: self.frame_id,
                decode_fps: self.current_fps,
            });

            Ok(Some(frame))
        }
    }

    fn uninit(&mut self, _ctx: &FrameFilterContext) {
        println!("✅ 解码线程退出");
    }
}
