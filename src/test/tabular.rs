use super::sample_events;
use crate::error::DecodeError;
use crate::log::{ErrorKind, TABULAR_HEADER, decode, from_tabular, render_line, to_tabular};

#[test]
fn tabular_has_header_and_one_row_per_event() {
    let events = sample_events();
    let csv = to_tabular(&events);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], TABULAR_HEADER);
    assert_eq!(lines.len(), events.len() + 1);
    assert_eq!(lines[1], "2024-01-01 10:00:00:000,1,SEND,ACKed,");
    assert_eq!(lines[2], "2024-01-01 10:00:00:050,1,ACK,ACK,");
    assert_eq!(lines[3], "2024-01-01 10:00:00:100,2,SEND,NO_ACK,LOSS");
    assert_eq!(lines[6], "2024-01-01 10:00:01:600,3,RESEND,ACKed,DELAY");
}

#[test]
fn tabular_text_decodes_back_to_the_same_events() {
    let events = sample_events();
    let decoded = from_tabular(&to_tabular(&events)).expect("from tabular");
    assert_eq!(decoded, events);
}

#[test]
fn rendered_lines_decode_back_to_the_same_events() {
    let events = sample_events();
    let text = events.iter().map(render_line).collect::<Vec<_>>().join("\n");
    let decoded = decode(text.as_bytes()).expect("decode rendered lines");
    assert_eq!(decoded, events);
}

#[test]
fn render_line_matches_log_format() {
    let events = sample_events();
    assert_eq!(
        render_line(&events[2]),
        "\t2024-01-01 10:00:00:100 CST\tDATA_seq: 2\tLOSS\tNO_ACK"
    );
    assert_eq!(
        render_line(&events[4]),
        "\t2024-01-01 10:00:01:500 CST\t*Re: DATA_seq: 2\tACKed"
    );
    assert_eq!(render_line(&events[6]), "\t2024-01-01 10:00:01:700 CST\tACK_ack: 3");
}

#[test]
fn from_tabular_rejects_bad_header_and_rows() {
    assert!(matches!(
        from_tabular("ts,seq\n"),
        Err(DecodeError::Tabular { row: 1, .. })
    ));
    assert_eq!(from_tabular(""), Err(DecodeError::Empty));

    let bad_row = format!("{TABULAR_HEADER}\n2024-01-01 10:00:00:000,1,SEND\n");
    assert!(matches!(
        from_tabular(&bad_row),
        Err(DecodeError::Tabular { row: 2, .. })
    ));

    let bad_kind = format!("{TABULAR_HEADER}\n2024-01-01 10:00:00:000,1,PING,ACKed,\n");
    assert!(matches!(
        from_tabular(&bad_kind),
        Err(DecodeError::Tabular { row: 2, .. })
    ));
}

#[test]
fn ack_error_marker_kept_in_tabular_but_not_in_rendered_line() {
    let raw = "\t2024-01-01 10:00:00:000 CST\tACK_ack: 4\tLOSS\n";
    let events = decode(raw.as_bytes()).expect("decode");
    assert_eq!(events[0].error, Some(ErrorKind::Loss));

    assert_eq!(render_line(&events[0]), "\t2024-01-01 10:00:00:000 CST\tACK_ack: 4");
    let csv = to_tabular(&events);
    assert_eq!(csv.lines().nth(1), Some("2024-01-01 10:00:00:000,4,ACK,ACK,LOSS"));
}
