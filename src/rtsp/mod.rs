/// RTSP实时标签监控模块
/// RTSP Real-time AprilTag Monitoring Module
///
/// 双线程架构(通过FrameRelay通信):
/// 1. 解码线程: FFmpeg RTSP解码 → 发布GrayFrame (只保留最新帧)
/// 2. 检测线程: 领取GrayFrame → AprilTag检测 → 去抖 → 发送TagEvent
pub mod decode_filter;
pub mod decoder;
pub mod detector;
pub mod monitor;
pub mod relay;
pub mod tracker;
pub mod types;

use std::sync::atomic::{AtomicBool, Ordering};

// ========== 公共常量 ==========

/// 连续丢失帧数阈值默认值
pub const DEFAULT_MISSING_THRESHOLD: u32 = 5;

// ========== 全局停止标志 ==========

static RUNNING: AtomicBool = AtomicBool::new(true);

/// 请求整个流水线停止 (Ctrl+C处理器调用)
pub fn stop() {
    RUNNING.store(false, Ordering::SeqCst);
}

/// 流水线是否仍在运行
pub fn running() -> bool {
    RUNNING.load(Ordering::SeqCst)
}

// ========== 重新导出常用类型 ==========

pub use decode_filter::DecodeFilter;
pub use decoder::Decoder;
pub use detector::{AprilTagDetector, TagDetect};
pub use monitor::detection_thread;
pub use relay::{frame_relay, RelayClosed, RelayConsumer, RelayPublisher};
pub use tracker::{PresenceEvents, PresenceTracker};
pub use types::{GrayFrame, TagEvent, TagId};
