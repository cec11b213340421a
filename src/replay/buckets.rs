//! 错误桶
//!
//! 三个固定的桶（WRONG/LOSS/DELAY），每个桶按序号保存最近一次出错的包。
//! 累计确认：收到 ack N 后，所有桶里序号 <= N 的条目都被清除。

use super::packet::ActivePacket;
use crate::log::ErrorKind;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBuckets {
    wrong: BTreeMap<u64, ActivePacket>,
    loss: BTreeMap<u64, ActivePacket>,
    delay: BTreeMap<u64, ActivePacket>,
}

impl ErrorBuckets {
    pub fn bucket(&self, kind: ErrorKind) -> &BTreeMap<u64, ActivePacket> {
        match kind {
            ErrorKind::Wrong => &self.wrong,
            ErrorKind::Loss => &self.loss,
            ErrorKind::Delay => &self.delay,
        }
    }

    fn bucket_mut(&mut self, kind: ErrorKind) -> &mut BTreeMap<u64, ActivePacket> {
        match kind {
            ErrorKind::Wrong => &mut self.wrong,
            ErrorKind::Loss => &mut self.loss,
            ErrorKind::Delay => &mut self.delay,
        }
    }

    /// 按 (错误类型, 序号) 插入或覆盖；没有错误类型的包被忽略。
    pub fn insert(&mut self, pkt: ActivePacket) -> bool {
        let Some(kind) = pkt.error else {
            return false;
        };
        self.bucket_mut(kind).insert(pkt.seq, pkt);
        true
    }

    /// 清除所有桶中序号 `<= ack` 的条目，返回清除数量
    pub fn purge_upto(&mut self, ack: u64) -> usize {
        let mut removed = 0;
        for kind in ErrorKind::ALL {
            let bucket = self.bucket_mut(kind);
            let keep = match ack.checked_add(1) {
                Some(first_kept) => bucket.split_off(&first_kept),
                None => BTreeMap::new(),
            };
            removed += bucket.len();
            *bucket = keep;
        }
        removed
    }

    /// 按展示顺序遍历 (类型, 桶)
    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, &BTreeMap<u64, ActivePacket>)> {
        ErrorKind::ALL.into_iter().map(|kind| (kind, self.bucket(kind)))
    }

    pub fn len(&self) -> usize {
        self.wrong.len() + self.loss.len() + self.delay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 所有桶中最小的序号
    pub fn min_seq(&self) -> Option<u64> {
        self.iter()
            .filter_map(|(_, bucket)| bucket.keys().next().copied())
            .min()
    }
}
