//! 整份日志解码
//!
//! 原始字节 -> UTF-8 文本 -> 逐行解析 -> 按时间戳稳定排序。

use super::event::Event;
use super::parser::try_parse_line;
use crate::config::ReplayConfig;
use crate::error::DecodeError;
use tracing::{debug, info, warn};

/// 一次解码的逐行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub header_lines: usize,
    pub unrecognized_lines: usize,
    pub failed_lines: usize,
    pub events: usize,
}

/// 按给定配置（标题前缀）解码日志
#[derive(Debug, Clone)]
pub struct LogDecoder {
    sender_header: String,
    receiver_header: String,
}

impl Default for LogDecoder {
    fn default() -> Self {
        Self::from_config(&ReplayConfig::default())
    }
}

impl LogDecoder {
    pub fn from_config(cfg: &ReplayConfig) -> Self {
        Self {
            sender_header: cfg.sender_header.clone(),
            receiver_header: cfg.receiver_header.clone(),
        }
    }

    fn is_header(&self, line: &str) -> bool {
        line.starts_with(self.sender_header.as_str())
            || line.starts_with(self.receiver_header.as_str())
    }

    pub fn decode(&self, raw: &[u8]) -> Result<Vec<Event>, DecodeError> {
        self.decode_with_stats(raw).map(|(events, _)| events)
    }

    #[tracing::instrument(skip(self, raw), fields(bytes = raw.len()))]
    pub fn decode_with_stats(&self, raw: &[u8]) -> Result<(Vec<Event>, DecodeStats), DecodeError> {
        let text = std::str::from_utf8(raw).map_err(|e| DecodeError::InvalidEncoding {
            valid_up_to: e.valid_up_to(),
        })?;
        self.decode_str(text)
    }

    pub fn decode_str(&self, text: &str) -> Result<(Vec<Event>, DecodeStats), DecodeError> {
        let text = text.trim_start_matches('\u{feff}');
        let mut stats = DecodeStats::default();
        let mut events = Vec::new();

        for (idx, raw_line) in text.split('\n').enumerate() {
            stats.total_lines += 1;
            let line = raw_line.trim();
            if line.is_empty() {
                stats.blank_lines += 1;
                continue;
            }
            if self.is_header(line) {
                stats.header_lines += 1;
                continue;
            }
            match try_parse_line(line) {
                Ok(Some(ev)) => events.push(ev),
                Ok(None) => {
                    stats.unrecognized_lines += 1;
                    debug!(line_no = idx + 1, line, "非事件行");
                }
                Err(err) => {
                    stats.failed_lines += 1;
                    warn!(line_no = idx + 1, line, error = %err, "跳过无法解析的行");
                }
            }
        }

        if stats.blank_lines == stats.total_lines {
            return Err(DecodeError::Empty);
        }
        if events.is_empty() {
            return Err(DecodeError::NoEvents {
                lines: stats.total_lines - stats.blank_lines,
            });
        }

        // 稳定排序：时间戳相同的事件保持原始行序
        events.sort_by_key(|ev| ev.timestamp);
        stats.events = events.len();

        info!(
            events = stats.events,
            failed = stats.failed_lines,
            unrecognized = stats.unrecognized_lines,
            headers = stats.header_lines,
            "日志解码完成"
        );
        Ok((events, stats))
    }
}

/// 使用默认标题前缀解码
pub fn decode(raw: &[u8]) -> Result<Vec<Event>, DecodeError> {
    LogDecoder::default().decode(raw)
}
