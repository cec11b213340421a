//! 回放模块
//!
//! 由时间游标驱动：每次更新重建前缀中的包记录，累积错误桶与吞吐率历史。

mod buckets;
mod packet;
mod state;
mod throughput;

pub use buckets::ErrorBuckets;
pub use packet::{ActivePacket, Direction};
pub use state::{Dataset, PlayState, ReplayState, Session, Trigger};
pub use throughput::{ThroughputHistory, ThroughputSample, trailing_rate};
