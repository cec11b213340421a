use super::types::{
    BucketContents, BucketedPacket, Frame, NetworkSnapshot, PacketInFlight, ThroughputPoint,
    ThroughputSnapshot,
};
use crate::config::ReplayConfig;
use crate::replay::{ActivePacket, ErrorBuckets, ThroughputHistory};
use crate::timeline::ReplayTime;

/// 只读投影：不修改任何回放状态
pub fn build_snapshot(
    cursor: ReplayTime,
    active: &[ActivePacket],
    buckets: &ErrorBuckets,
    history: &ThroughputHistory,
    cfg: &ReplayConfig,
) -> Frame {
    let flight_s = cfg.flight().as_secs_f64();
    let packets_in_flight = active
        .iter()
        .filter(|p| p.in_flight_at(cursor))
        .map(|p| PacketInFlight {
            seq: p.seq,
            kind: p.kind,
            status: p.status,
            error: p.error,
            direction: p.direction,
            start: p.start,
            end: p.end,
            progress: cursor.saturating_sub(p.start).as_secs_f64() / flight_s,
        })
        .collect();

    let error_buckets = buckets
        .iter()
        .map(|(kind, bucket)| BucketContents {
            kind,
            packets: bucket
                .values()
                .map(|p| BucketedPacket {
                    seq: p.seq,
                    direction: p.direction,
                    kind: p.kind,
                })
                .collect(),
        })
        .collect();

    let series = history
        .samples()
        .map(|s| ThroughputPoint {
            time: s.time,
            throughput: s.throughput,
        })
        .collect();

    Frame {
        cursor,
        network: NetworkSnapshot {
            packets_in_flight,
            error_buckets,
        },
        throughput: ThroughputSnapshot { series },
    }
}
