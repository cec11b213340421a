//! 回放时间类型
//!
//! 相对时间以整数毫秒存储，比较时没有浮点误差。

use serde::{Serialize, Serializer};

/// 相对于日志中最早事件的时间（毫秒）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ReplayTime(pub u64);

impl ReplayTime {
    pub const ZERO: ReplayTime = ReplayTime(0);

    pub fn from_millis(ms: u64) -> ReplayTime {
        ReplayTime(ms)
    }

    pub fn from_secs(s: u64) -> ReplayTime {
        ReplayTime(s.saturating_mul(1_000))
    }

    /// 四舍五入到毫秒；负数和 NaN 取 0，超大值饱和。
    pub fn from_secs_f64(s: f64) -> ReplayTime {
        if s.is_nan() || s <= 0.0 {
            return ReplayTime::ZERO;
        }
        let ms = (s * 1_000.0).round();
        if ms >= u64::MAX as f64 {
            ReplayTime(u64::MAX)
        } else {
            ReplayTime(ms as u64)
        }
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    pub fn saturating_add(self, rhs: ReplayTime) -> ReplayTime {
        ReplayTime(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: ReplayTime) -> ReplayTime {
        ReplayTime(self.0.saturating_sub(rhs.0))
    }

    /// 钳制到 `[lo, hi]`
    pub fn clamp_to(self, lo: ReplayTime, hi: ReplayTime) -> ReplayTime {
        self.max(lo).min(hi)
    }
}

/// 对外（渲染端）统一输出秒
impl Serialize for ReplayTime {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.as_secs_f64())
    }
}
