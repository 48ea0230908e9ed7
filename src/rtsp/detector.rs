/// AprilTag检测器模块
/// AprilTag detector module
use super::types::{GrayFrame, TagId};
use anyhow::{anyhow, Result};
use apriltag::{Detector, DetectorBuilder, Family};
use apriltag_image::ImageExt;
use image::GrayImage;
use std::collections::BTreeSet;

/// 标签检测接口: 一帧灰度图 → 检出的标签ID集合
///
/// 检测算法对跟踪逻辑是黑盒,角点坐标等几何信息在这一层丢弃
pub trait TagDetect {
    fn detect(&mut self, frame: &GrayFrame) -> BTreeSet<TagId>;
}

/// 基于AprilTag C库的检测器
pub struct AprilTagDetector {
    detector: Detector,
}

// SAFETY: AprilTagDetector独占其C检测器指针,整个生命周期只在检测线程使用;
// apriltag 0.4 的 Detector 仅因内部 NonNull 裸指针未标记 Send
unsafe impl Send for AprilTagDetector {}

impl AprilTagDetector {
    /// 按家族名创建检测器 (tag36h11 / tagStandard41h12 / ...)
    pub fn new(family: &str) -> Result<Self> {
        let parsed: Family = family
            .parse()
            .map_err(|e| anyhow!("未知标签家族 {}: {:?}", family, e))?;
        let detector = DetectorBuilder::new()
            .add_family_bits(parsed, 1)
            .build()
            .map_err(|e| anyhow!("检测器初始化失败: {:?}", e))?;
        Ok(Self { detector })
    }
}

impl TagDetect for AprilTagDetector {
    fn detect(&mut self, frame: &GrayFrame) -> BTreeSet<TagId> {
        let Some(buf) = GrayImage::from_raw(frame.width, frame.height, frame.data.clone())
        else {
            // 尺寸和数据长度不符,丢弃这一帧
            return BTreeSet::new();
        };
        let image = apriltag::Image::from_image_buffer(&buf);
        self.detector
            .detect(&image)
            .iter()
            .map(|d| d.id() as TagId)
            .collect()
    }
}
