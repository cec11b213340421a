//! 单行解析
//!
//! 行格式：`<date> <time> CST <payload>`。载荷按子串分派：
//! 含 `DATA_seq` 为数据段（SEND/RESEND），否则含 `ACK_ack` 为确认，其余行不是事件。

use super::event::{AckStatus, ErrorKind, Event, EventKind, parse_timestamp};
use crate::error::ParseError;
use tracing::warn;

const ZONE_MARKER: &str = "CST";
const DATA_KEYWORD: &str = "DATA_seq";
const DATA_LABEL: &str = "DATA_seq:";
const ACK_KEYWORD: &str = "ACK_ack";
const ACK_LABEL: &str = "ACK_ack:";
const RESEND_MARKER: &str = "*Re:";
const ACKED_MARKER: &str = "ACKed";

/// 解析一行；无法识别的行返回 `Ok(None)`。
pub fn try_parse_line(raw: &str) -> Result<Option<Event>, ParseError> {
    let line = raw.trim();
    let (ts_part, payload) = match line.split_once(ZONE_MARKER) {
        Some((ts, rest)) => (ts.trim(), rest.trim()),
        None => return Err(ParseError::malformed_timestamp(line)),
    };
    let timestamp = parse_timestamp(ts_part)?;

    if payload.contains(DATA_KEYWORD) {
        let kind = if payload.starts_with(RESEND_MARKER) {
            EventKind::Resend
        } else {
            EventKind::Send
        };
        let (_, after) = payload
            .split_once(DATA_LABEL)
            .ok_or(ParseError::MissingLabel { label: DATA_LABEL })?;
        let mut tokens = after.split_whitespace();
        let seq = parse_seq(tokens.next())?;
        // 数据段按 token 精确匹配错误标记
        let rest: Vec<&str> = tokens.collect();
        let error = scan_error_kind(|marker| rest.contains(&marker));
        let status = if payload.contains(ACKED_MARKER) {
            AckStatus::Acked
        } else {
            AckStatus::NoAck
        };
        return Ok(Some(Event {
            timestamp,
            seq,
            kind,
            status,
            error,
        }));
    }

    if payload.contains(ACK_KEYWORD) {
        let (_, after) = payload
            .split_once(ACK_LABEL)
            .ok_or(ParseError::MissingLabel { label: ACK_LABEL })?;
        let seq = parse_seq(after.split_whitespace().next())?;
        // ACK 行按子串匹配整个载荷
        let error = scan_error_kind(|marker| payload.contains(marker));
        return Ok(Some(Event {
            timestamp,
            seq,
            kind: EventKind::Ack,
            status: AckStatus::Ack,
            error,
        }));
    }

    Ok(None)
}

/// 解析一行；失败时记录警告并返回 `None`，不会中断整批解析。
pub fn parse_line(raw: &str) -> Option<Event> {
    match try_parse_line(raw) {
        Ok(ev) => ev,
        Err(err) => {
            warn!(line = raw.trim(), error = %err, "跳过无法解析的行");
            None
        }
    }
}

fn parse_seq(token: Option<&str>) -> Result<u64, ParseError> {
    let token = token.unwrap_or_default();
    token
        .parse::<u64>()
        .map_err(|_| ParseError::invalid_seq(token))
}

/// 按固定优先级 WRONG > DELAY > LOSS 返回第一个命中的错误类型
fn scan_error_kind(mut present: impl FnMut(&'static str) -> bool) -> Option<ErrorKind> {
    ErrorKind::SCAN_PRIORITY
        .into_iter()
        .find(|kind| present(kind.as_str()))
}
