/// RTSP解码器模块
/// RTSP decoder module
use super::decode_filter::DecodeFilter;
use super::relay::RelayPublisher;
use super::types::GrayFrame;
use anyhow::{anyhow, Result};
use ez_ffmpeg::core::context::null_output::create_null_output;
use ez_ffmpeg::filter::frame_pipeline_builder::FramePipelineBuilder;
use ez_ffmpeg::{AVMediaType, FfmpegContext};

/// RTSP解码器: 打开流,把解码出的灰度帧发布到帧中继
pub struct Decoder {
    rtsp_url: String,
}

impl Decoder {
    pub fn new(rtsp_url: impl Into<String>) -> Self {
        Self {
            rtsp_url: rtsp_url.into(),
        }
    }

    /// 持续解码,直到流结束、出错或收到停止信号
    ///
    /// 任何退出路径都会Drop掉中继的生产者端,
    /// 阻塞在take()上的检测线程随之解除阻塞并退出
    pub fn run(self, relay: RelayPublisher<GrayFrame>) -> Result<()> {
        let filter = DecodeFilter::new(relay);

        let pipe: FramePipelineBuilder = AVMediaType::AVMEDIA_TYPE_VIDEO.into();
        let pipe = pipe.filter("gray", Box::new(filter));
        let out = create_null_output().add_frame_pipeline(pipe);

        let ctx = FfmpegContext::builder()
            .input(self.rtsp_url.as_str())
            .filter_desc("format=yuv420p")
            .output(out)
            .build()
            .map_err(|e| anyhow!("无法打开RTSP流: {}", e))?;

        let sch = ctx
            .start()
            .map_err(|e| anyhow!("解码启动失败: {}", e))?;

        println!("✅ RTSP流连接成功,开始解码");
        let _ = sch.wait();
        Ok(())
    }
}
