/// 流水线消息类型定义
/// Pipeline message types
use serde::Serialize;

/// AprilTag编码的整数ID
pub type TagId = u32;

// ========== 线程间消息类型 ==========

/// 灰度帧 (解码线程 → 检测线程)
///
/// 解码器直接提取YUV420P的Y平面,检测只需要亮度信息
#[derive(Clone, Debug)]
pub struct GrayFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_id: u64, // 帧序号
    pub decode_fps: f64,
}

/// 标签事件 (检测线程 → 报告层)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "tag_id", rename_all = "snake_case")]
pub enum TagEvent {
    /// 标签首次出现(或消失后再次出现)
    Found(TagId),
    /// 标签连续丢失达到阈值,判定消失
    Lost(TagId),
}
