//! 渲染快照
//!
//! 给定游标与回放状态，投影出链路上的包、错误桶内容和吞吐率曲线。

mod builder;
mod types;

pub use builder::build_snapshot;
pub use types::{
    BucketContents, BucketedPacket, Frame, NetworkSnapshot, PacketInFlight, ThroughputPoint,
    ThroughputSnapshot,
};
