use super::{SAMPLE_LOG, sample_events};
use crate::config::ReplayConfig;
use crate::error::DecodeError;
use crate::log::{EventKind, LogDecoder, decode};

#[test]
fn decode_merges_sender_and_receiver_sections_in_time_order() {
    let events = sample_events();
    let order: Vec<(EventKind, u64)> = events.iter().map(|e| (e.kind, e.seq)).collect();
    assert_eq!(
        order,
        vec![
            (EventKind::Send, 1),
            (EventKind::Ack, 1),
            (EventKind::Send, 2),
            (EventKind::Send, 3),
            (EventKind::Resend, 2),
            (EventKind::Resend, 3),
            (EventKind::Ack, 3),
        ]
    );
    assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn decode_reports_line_stats() {
    let (events, stats) = LogDecoder::default()
        .decode_with_stats(SAMPLE_LOG.as_bytes())
        .expect("decode");
    assert_eq!(events.len(), 7);
    assert_eq!(stats.events, 7);
    assert_eq!(stats.header_lines, 2);
    // 中间的空行 + 末尾换行之后的空串
    assert_eq!(stats.blank_lines, 2);
    assert_eq!(stats.failed_lines, 0);
    assert_eq!(stats.unrecognized_lines, 0);
    assert_eq!(stats.total_lines, 11);
}

#[test]
fn bad_lines_do_not_abort_the_batch() {
    let raw = "\t2024-01-01 10:00:00:000 CST\tDATA_seq: 1\tACKed\n\
               \t2024-01-01 10:00:00:xx0 CST\tDATA_seq: 2\tACKed\n\
               \t2024-01-01 10:00:00:020 CST\tDATA_seq: two\tACKed\n\
               \t2024-01-01 10:00:00:030 CST\tsomething else\n\
               \t2024-01-01 10:00:00:040 CST\tACK_ack: 1\n";
    let (events, stats) = LogDecoder::default()
        .decode_with_stats(raw.as_bytes())
        .expect("partial decode");
    assert_eq!(events.len(), 2);
    assert_eq!(stats.failed_lines, 2);
    assert_eq!(stats.unrecognized_lines, 1);
}

#[test]
fn equal_timestamps_keep_original_line_order() {
    let raw = "2024-01-01 10:00:00:500 CST\tDATA_seq: 9\tACKed\n\
               2024-01-01 10:00:00:100 CST\tDATA_seq: 1\tACKed\n\
               2024-01-01 10:00:00:500 CST\tACK_ack: 9\n\
               2024-01-01 10:00:00:500 CST\t*Re: DATA_seq: 8\tNO_ACK\n";
    let events = decode(raw.as_bytes()).expect("decode");
    let order: Vec<(EventKind, u64)> = events.iter().map(|e| (e.kind, e.seq)).collect();
    assert_eq!(
        order,
        vec![
            (EventKind::Send, 1),
            (EventKind::Send, 9),
            (EventKind::Ack, 9),
            (EventKind::Resend, 8),
        ]
    );
}

#[test]
fn crlf_and_bom_are_tolerated() {
    let raw = "\u{feff}发送方\r\n\t2024-01-01 10:00:00:000 CST\tDATA_seq: 1\tACKed\r\n";
    let events = decode(raw.as_bytes()).expect("decode");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].seq, 1);
}

#[test]
fn empty_upload_is_a_decode_error() {
    assert_eq!(decode(b""), Err(DecodeError::Empty));
    assert_eq!(decode(b"  \n\n\t\n"), Err(DecodeError::Empty));
}

#[test]
fn upload_without_events_is_a_decode_error() {
    let raw = "发送方\nhello\n2024-01-01 10:00:00:000 CST\tnothing here\n";
    assert_eq!(decode(raw.as_bytes()), Err(DecodeError::NoEvents { lines: 3 }));
}

#[test]
fn non_utf8_upload_is_a_decode_error() {
    let raw = [b'2', b'0', 0xff, 0xfe, b'\n'];
    assert_eq!(
        decode(&raw),
        Err(DecodeError::InvalidEncoding { valid_up_to: 2 })
    );
}

#[test]
fn header_prefixes_come_from_config() {
    let cfg = ReplayConfig {
        sender_header: "Sender".to_string(),
        receiver_header: "Receiver".to_string(),
        ..ReplayConfig::default()
    };
    let raw = "Sender log\n2024-01-01 10:00:00:000 CST\tDATA_seq: 1\tACKed\nReceiver log\n";
    let (events, stats) = LogDecoder::from_config(&cfg)
        .decode_with_stats(raw.as_bytes())
        .expect("decode");
    assert_eq!(events.len(), 1);
    assert_eq!(stats.header_lines, 2);
}
