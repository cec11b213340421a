use crate::log::{AckStatus, ErrorKind, EventKind};
use crate::replay::Direction;
use crate::timeline::ReplayTime;
use serde::Serialize;

/// 当前时刻仍在链路上的包
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacketInFlight {
    pub seq: u64,
    pub kind: EventKind,
    pub status: AckStatus,
    pub error: Option<ErrorKind>,
    pub direction: Direction,
    pub start: ReplayTime,
    pub end: ReplayTime,
    /// 飞行进度 `(cursor - start) / flight`，范围 [0, 1)
    pub progress: f64,
}

impl PacketInFlight {
    /// 在长度为 `link_length` 的链路上的位置：发送方在 0，接收方在 `link_length`
    pub fn position(&self, link_length: f64) -> f64 {
        match self.direction {
            Direction::ToReceiver => link_length * self.progress,
            Direction::ToSender => link_length - link_length * self.progress,
        }
    }
}

/// 错误桶中的一个条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketedPacket {
    pub seq: u64,
    pub direction: Direction,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketContents {
    pub kind: ErrorKind,
    /// 按序号升序
    pub packets: Vec<BucketedPacket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub packets_in_flight: Vec<PacketInFlight>,
    pub error_buckets: Vec<BucketContents>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThroughputPoint {
    pub time: ReplayTime,
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputSnapshot {
    pub series: Vec<ThroughputPoint>,
}

/// 交给渲染端的一帧
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub cursor: ReplayTime,
    pub network: NetworkSnapshot,
    pub throughput: ThroughputSnapshot,
}

impl Frame {
    pub fn bucket(&self, kind: ErrorKind) -> Option<&BucketContents> {
        self.network.error_buckets.iter().find(|b| b.kind == kind)
    }
}
