//! 表格交接格式（CSV）与规范化日志行

use super::event::{Event, EventKind, format_timestamp, parse_timestamp};
use crate::error::DecodeError;
use std::fmt::Write as _;

pub const TABULAR_HEADER: &str = "timestamp,seq_num,event_type,status,error_type";

/// 每个事件一行，错误类型缺省时留空
pub fn to_tabular(events: &[Event]) -> String {
    let mut out = String::with_capacity(TABULAR_HEADER.len() + 1 + events.len() * 48);
    out.push_str(TABULAR_HEADER);
    out.push('\n');
    for ev in events {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            format_timestamp(&ev.timestamp),
            ev.seq,
            ev.kind,
            ev.status,
            ev.error.map(|e| e.as_str()).unwrap_or_default()
        );
    }
    out
}

/// 解析 `to_tabular` 的输出。行号从 1 开始（表头为第 1 行）。
pub fn from_tabular(text: &str) -> Result<Vec<Event>, DecodeError> {
    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header.trim() == TABULAR_HEADER => {}
        Some((_, header)) => {
            return Err(DecodeError::tabular(1, format!("unexpected header '{}'", header.trim())));
        }
        None => return Err(DecodeError::Empty),
    }

    let mut events = Vec::new();
    for (idx, line) in lines {
        let row = idx + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split(',').collect();
        let [ts, seq, kind, status, error] = cols.as_slice() else {
            return Err(DecodeError::tabular(
                row,
                format!("expected 5 columns, got {}", cols.len()),
            ));
        };
        let timestamp = parse_timestamp(ts).map_err(|e| DecodeError::tabular(row, e.to_string()))?;
        let seq = seq
            .parse::<u64>()
            .map_err(|_| DecodeError::tabular(row, format!("invalid seq_num '{seq}'")))?;
        let kind = kind.parse().map_err(|e: String| DecodeError::tabular(row, e))?;
        let status = status.parse().map_err(|e: String| DecodeError::tabular(row, e))?;
        let error = if error.is_empty() {
            None
        } else {
            Some(error.parse().map_err(|e: String| DecodeError::tabular(row, e))?)
        };
        events.push(Event {
            timestamp,
            seq,
            kind,
            status,
            error,
        });
    }
    Ok(events)
}

/// 把事件还原成原始日志行格式（以制表符开头）
///
/// ACK 行只写 `ACK_ack: N`，不带错误标记；需要保留 ACK 错误类型时用 [`to_tabular`]。
pub fn render_line(ev: &Event) -> String {
    let ts = format_timestamp(&ev.timestamp);
    match ev.kind {
        EventKind::Ack => format!("\t{ts} CST\tACK_ack: {}", ev.seq),
        EventKind::Send | EventKind::Resend => {
            let prefix = if ev.kind == EventKind::Resend { "*Re: " } else { "" };
            let error = ev
                .error
                .map(|e| format!("\t{e}"))
                .unwrap_or_default();
            format!("\t{ts} CST\t{prefix}DATA_seq: {}{error}\t{}", ev.seq, ev.status)
        }
    }
}
