//! 时间轴索引
//!
//! 事件按时间戳升序排列，并预先计算相对时间；`query_upto` 用二分定位前缀。

use super::time::ReplayTime;
use crate::log::Event;
use chrono::NaiveDateTime;
use tracing::debug;

/// 带相对时间的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub rel: ReplayTime,
    pub event: Event,
}

/// 按时间排序的事件序列
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    origin: Option<NaiveDateTime>,
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// 构建时间轴。输入会被稳定排序，已排好序的输入保持原顺序。
    pub fn build(mut events: Vec<Event>) -> Timeline {
        events.sort_by_key(|ev| ev.timestamp);
        let origin = events.first().map(|ev| ev.timestamp);
        let entries = match origin {
            Some(origin) => events
                .into_iter()
                .map(|event| {
                    let ms = (event.timestamp - origin).num_milliseconds();
                    TimelineEntry {
                        rel: ReplayTime::from_millis(u64::try_from(ms).unwrap_or(0)),
                        event,
                    }
                })
                .collect(),
            None => Vec::new(),
        };
        let timeline = Timeline { origin, entries };
        debug!(
            events = timeline.len(),
            max_ms = timeline.max_time().as_millis(),
            "时间轴已构建"
        );
        timeline
    }

    /// 所有相对时间 `<= t` 的事件（按排序顺序）
    pub fn query_upto(&self, t: ReplayTime) -> &[TimelineEntry] {
        let end = self.entries.partition_point(|e| e.rel <= t);
        &self.entries[..end]
    }

    pub fn origin(&self) -> Option<NaiveDateTime> {
        self.origin
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().map(|e| &e.event)
    }

    /// 最大相对时间；空时间轴为 0
    pub fn max_time(&self) -> ReplayTime {
        self.entries.last().map(|e| e.rel).unwrap_or(ReplayTime::ZERO)
    }

    /// 相对时间（秒），与事件一一对应
    pub fn times_secs(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.rel.as_secs_f64()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
