//! 链路上的包记录
//!
//! 前缀中的每个事件都对应一个 `ActivePacket`：数据段从发送方飞向接收方，ACK 反向。

use crate::log::{AckStatus, ErrorKind, EventKind};
use crate::timeline::{ReplayTime, TimelineEntry};
use serde::Serialize;

/// 包的飞行方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToReceiver,
    ToSender,
}

impl From<EventKind> for Direction {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Send | EventKind::Resend => Direction::ToReceiver,
            EventKind::Ack => Direction::ToSender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePacket {
    pub seq: u64,
    pub start: ReplayTime,
    pub end: ReplayTime,
    pub direction: Direction,
    pub kind: EventKind,
    pub status: AckStatus,
    pub error: Option<ErrorKind>,
}

impl ActivePacket {
    pub fn from_entry(entry: &TimelineEntry, flight: ReplayTime) -> Self {
        let ev = &entry.event;
        ActivePacket {
            seq: ev.seq,
            start: entry.rel,
            end: entry.rel.saturating_add(flight),
            direction: ev.kind.into(),
            kind: ev.kind,
            status: ev.status,
            error: ev.error,
        }
    }

    /// 在 `[start, end)` 内视为仍在链路上
    pub fn in_flight_at(&self, t: ReplayTime) -> bool {
        self.start <= t && t < self.end
    }
}
