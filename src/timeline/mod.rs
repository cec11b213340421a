//! 时间轴模块
//!
//! 相对时间类型与有序事件索引。

mod index;
mod time;

pub use index::{Timeline, TimelineEntry};
pub use time::ReplayTime;
