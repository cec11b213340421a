//! 吞吐率
//!
//! 吞吐率 = 尾部窗口 `(cursor - window, cursor]` 内状态为 ACKed 的事件数 / 窗口秒数。
//! 历史记录为有界环形缓冲，相邻采样至少间隔 `min_gap`。

use crate::log::AckStatus;
use crate::timeline::{ReplayTime, TimelineEntry};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThroughputSample {
    pub time: ReplayTime,
    pub throughput: f64,
}

/// 计算尾部窗口内的 ACKed 速率。`prefix` 必须是 `cursor` 处的时间轴前缀。
pub fn trailing_rate(prefix: &[TimelineEntry], cursor: ReplayTime, window: ReplayTime) -> f64 {
    // 半开区间：rel > cursor - window；cursor 不足一个窗口时从 0 开始全部计入
    let start = prefix.partition_point(|e| e.rel.saturating_add(window) <= cursor);
    let acked = prefix[start..]
        .iter()
        .filter(|e| e.event.status == AckStatus::Acked)
        .count();
    acked as f64 / window.as_secs_f64()
}

#[derive(Debug, Clone)]
pub struct ThroughputHistory {
    samples: VecDeque<ThroughputSample>,
    capacity: usize,
    min_gap: ReplayTime,
}

impl ThroughputHistory {
    /// 容量至少为 1
    pub fn new(capacity: usize, min_gap: ReplayTime) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            min_gap,
        }
    }

    /// 为空或距上一个采样至少 `min_gap` 时追加；满时淘汰最旧的采样。
    pub fn push(&mut self, sample: ThroughputSample) -> bool {
        if let Some(last) = self.samples.back() {
            if sample.time < last.time.saturating_add(self.min_gap) {
                return false;
            }
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        true
    }

    pub fn samples(&self) -> impl Iterator<Item = &ThroughputSample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&ThroughputSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
