mod log_decoder;
mod tabular;

use crate::log::{Event, decode};

/// 发送方与接收方两段记录，接收方的 ACK 需要与发送方交错排序
pub(crate) const SAMPLE_LOG: &str = "发送方日志\n\
\t2024-01-01 10:00:00:000 CST\tDATA_seq: 1\tACKed\n\
\t2024-01-01 10:00:00:100 CST\tDATA_seq: 2\tLOSS\tNO_ACK\n\
\t2024-01-01 10:00:00:200 CST\tDATA_seq: 3\tWRONG\tNO_ACK\n\
\t2024-01-01 10:00:01:500 CST\t*Re: DATA_seq: 2\tACKed\n\
\t2024-01-01 10:00:01:600 CST\t*Re: DATA_seq: 3\tDELAY\tACKed\n\
\n\
接收方日志\n\
\t2024-01-01 10:00:00:050 CST\tACK_ack: 1\n\
\t2024-01-01 10:00:01:700 CST\tACK_ack: 3\n";

pub(crate) fn sample_events() -> Vec<Event> {
    decode(SAMPLE_LOG.as_bytes()).expect("decode sample log")
}
