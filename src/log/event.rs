//! 日志事件类型
//!
//! 一行数据日志解析后得到一个不可变的 `Event`。

use crate::error::ParseError;
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 时间戳格式：毫秒用冒号分隔，固定 3 位
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%3f";

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    #[serde(rename = "SEND")]
    Send,
    #[serde(rename = "RESEND")]
    Resend,
    #[serde(rename = "ACK")]
    Ack,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Send => "SEND",
            EventKind::Resend => "RESEND",
            EventKind::Ack => "ACK",
        }
    }

    /// SEND/RESEND 属于数据段
    pub fn is_data(self) -> bool {
        matches!(self, EventKind::Send | EventKind::Resend)
    }
}

/// 确认状态；ACK 记录自身固定为 `Ack`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AckStatus {
    #[serde(rename = "ACKed")]
    Acked,
    #[serde(rename = "NO_ACK")]
    NoAck,
    #[serde(rename = "ACK")]
    Ack,
}

impl AckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AckStatus::Acked => "ACKed",
            AckStatus::NoAck => "NO_ACK",
            AckStatus::Ack => "ACK",
        }
    }
}

/// 错误类型（对应三个错误桶）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "WRONG")]
    Wrong,
    #[serde(rename = "LOSS")]
    Loss,
    #[serde(rename = "DELAY")]
    Delay,
}

impl ErrorKind {
    /// 桶的展示顺序
    pub const ALL: [ErrorKind; 3] = [ErrorKind::Wrong, ErrorKind::Loss, ErrorKind::Delay];

    /// 一行里出现多个错误标记时的判定优先级：先到先得
    pub const SCAN_PRIORITY: [ErrorKind; 3] =
        [ErrorKind::Wrong, ErrorKind::Delay, ErrorKind::Loss];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Wrong => "WRONG",
            ErrorKind::Loss => "LOSS",
            ErrorKind::Delay => "DELAY",
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ty, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("unknown {} '{}'", stringify!($ty), s))
            }
        }
    };
}

impl_str_enum!(EventKind, [EventKind::Send, EventKind::Resend, EventKind::Ack]);
impl_str_enum!(AckStatus, [AckStatus::Acked, AckStatus::NoAck, AckStatus::Ack]);
impl_str_enum!(ErrorKind, [ErrorKind::Wrong, ErrorKind::Loss, ErrorKind::Delay]);

/// 一条已解析的收发事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub seq: u64,
    pub kind: EventKind,
    pub status: AckStatus,
    pub error: Option<ErrorKind>,
}

/// 严格解析 `YYYY-MM-DD HH:MM:SS:mmm`。
///
/// chrono 对数字宽度比较宽松（`%m` 接受 1 位），因此先按固定位置校验形状。
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 23
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 | 16 | 19 => *b == b':',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(ParseError::malformed_timestamp(raw));
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::malformed_timestamp(raw))
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}
