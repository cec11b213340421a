//! 错误类型
//!
//! 单行解析错误只影响该行；整份上传不可用时才返回 `DecodeError`。

use thiserror::Error;

/// 单行日志解析失败的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 时间戳不是 `YYYY-MM-DD HH:MM:SS:mmm`
    #[error("malformed timestamp '{raw}'")]
    MalformedTimestamp { raw: String },

    /// `DATA_seq:` / `ACK_ack:` 之后的第一个 token 不是非负整数
    #[error("invalid sequence number '{raw}'")]
    InvalidSequenceNumber { raw: String },

    /// 载荷里出现了关键字但缺少带冒号的标签
    #[error("missing label '{label}'")]
    MissingLabel { label: &'static str },
}

impl ParseError {
    pub fn malformed_timestamp(raw: impl Into<String>) -> Self {
        Self::MalformedTimestamp { raw: raw.into() }
    }

    pub fn invalid_seq(raw: impl Into<String>) -> Self {
        Self::InvalidSequenceNumber { raw: raw.into() }
    }
}

/// 整份日志无法使用
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// 上传内容不是 UTF-8 文本
    #[error("upload is not valid utf-8 (first bad byte at {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },

    /// 没有任何非空行
    #[error("upload is empty")]
    Empty,

    /// 有内容，但没有一行能解析成事件
    #[error("no events found in {lines} line(s)")]
    NoEvents { lines: usize },

    /// 表格格式（CSV）某一行无法还原
    #[error("tabular row {row}: {message}")]
    Tabular { row: usize, message: String },
}

impl DecodeError {
    pub fn tabular(row: usize, message: impl Into<String>) -> Self {
        Self::Tabular {
            row,
            message: message.into(),
        }
    }
}

/// 回放配置加载失败
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// 字段取值不合法
    #[error("invalid config field '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
