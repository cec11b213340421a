//! 日志解析模块
//!
//! 把 TCP 实验日志（发送方/接收方事件记录）解析为按时间排序的事件序列，
//! 并提供交给渲染端的表格格式。

mod decoder;
mod event;
mod parser;
mod tabular;

pub use decoder::{DecodeStats, LogDecoder, decode};
pub use event::{
    AckStatus, ErrorKind, Event, EventKind, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp,
};
pub use parser::{parse_line, try_parse_line};
pub use tabular::{TABULAR_HEADER, from_tabular, render_line, to_tabular};
