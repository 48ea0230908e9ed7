/// 标签在场状态跟踪模块
/// Debounced tag presence tracking
///
/// 检测结果逐帧抖动: 运动模糊、局部遮挡都会让标签偶尔漏检一两帧。
/// 跟踪器把逐帧检测集合转换成稳定的"出现/消失"事件:
/// 只有连续丢失达到阈值才判定消失,期间重新检出则静默复位计数。
use super::types::TagId;
use std::collections::{BTreeMap, BTreeSet};

/// 单个检测周期产生的事件
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresenceEvents {
    /// 本周期新出现的标签 (ID升序)
    pub found: Vec<TagId>,
    /// 本周期判定消失的标签 (ID升序)
    pub lost: Vec<TagId>,
}

impl PresenceEvents {
    pub fn is_empty(&self) -> bool {
        self.found.is_empty() && self.lost.is_empty()
    }
}

/// 去抖在场跟踪器
///
/// 状态是 tag_id → 连续丢失帧数 的映射:
/// - 0          = 本周期检出
/// - 1..阈值-1  = 容忍中的丢失
/// - 达到阈值   = 移除并报告消失 (映射里不会存在达到阈值的键)
///
/// 纯状态机,无内部同步,只能在检测线程调用
pub struct PresenceTracker {
    misses: BTreeMap<TagId, u32>,
    threshold: u32,
}

impl PresenceTracker {
    /// 创建跟踪器,threshold为判定消失所需的连续丢失帧数 (≥1)
    pub fn new(threshold: u32) -> Self {
        Self {
            misses: BTreeMap::new(),
            threshold: threshold.max(1),
        }
    }

    /// 喂入一个检测周期的标签集合,返回本周期的出现/消失事件
    ///
    /// 每处理一帧调用一次。空集合合法: 所有在跟踪的标签逐周期老化
    pub fn update(&mut self, detected: &BTreeSet<TagId>) -> PresenceEvents {
        let mut events = PresenceEvents::default();

        // 检出的标签: 新键报告出现,旧键静默复位计数
        for &id in detected {
            if self.misses.insert(id, 0).is_none() {
                events.found.push(id);
            }
        }

        // 未检出的标签: 计数+1,达到阈值即移除并报告消失
        let threshold = self.threshold;
        self.misses.retain(|id, miss| {
            if detected.contains(id) {
                return true;
            }
            *miss += 1;
            if *miss >= threshold {
                events.lost.push(*id);
                false
            } else {
                true
            }
        });

        events
    }

    /// 当前判定为可见的标签 (ID升序)
    pub fn tracked(&self) -> impl Iterator<Item = TagId> + '_ {
        self.misses.keys().copied()
    }

    /// 当前跟踪的标签数量
    pub fn len(&self) -> usize {
        self.misses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.misses.is_empty()
    }

    /// 清空所有跟踪状态
    pub fn reset(&mut self) {
        self.misses.clear();
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new(super::DEFAULT_MISSING_THRESHOLD)
    }
}
