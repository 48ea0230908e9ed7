/// 检测线程模块
/// Detection thread module
use super::detector::TagDetect;
use super::relay::RelayConsumer;
use super::tracker::PresenceTracker;
use super::types::{GrayFrame, TagEvent};
use crossbeam_channel::Sender;
use std::time::Instant;

/// 检测线程: 领取最新帧 → 检测 → 去抖 → 发送标签事件
///
/// 中继关闭(解码结束)或事件接收端关闭时退出
pub fn detection_thread(
    frames: RelayConsumer<GrayFrame>,
    mut detector: impl TagDetect,
    mut tracker: PresenceTracker,
    events: Sender<TagEvent>,
) {
    println!("✅ 检测线程启动");

    let mut count = 0u64;
    let mut last = Instant::now();

    while let Ok(frame) = frames.take() {
        count += 1;

        let detected = detector.detect(&frame);
        let cycle = tracker.update(&detected);

        for id in cycle.found {
            if events.send(TagEvent::Found(id)).is_err() {
                return;
            }
        }
        for id in cycle.lost {
            if events.send(TagEvent::Lost(id)).is_err() {
                return;
            }
        }

        // 每秒打印一次检测统计
        if last.elapsed().as_secs_f64() >= 1.0 {
            let elapsed = last.elapsed().as_secs_f64();
            println!(
                "📊 检测统计: 处理{}帧 | 实际{:.1}fps | 解码{:.1}fps | 可见标签{}个",
                count,
                count as f64 / elapsed,
                frame.decode_fps,
                tracker.len()
            );
            last = Instant::now();
            count = 0;
        }
    }

    println!("✅ 检测线程退出");
}
