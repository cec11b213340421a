//! 回放配置
//!
//! 所有时间常量都以毫秒存储；JSON 中缺省的字段取默认值。

use crate::error::ConfigError;
use crate::timeline::ReplayTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 发送方日志段的标题前缀
pub const SENDER_HEADER: &str = "发送方";
/// 接收方日志段的标题前缀
pub const RECEIVER_HEADER: &str = "接收方";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// 倍率为 1 时两次 tick 之间的墙钟间隔
    pub base_interval_ms: u64,
    /// 每个 tick 推进的回放时间（与倍率无关）
    pub tick_step_ms: u64,
    /// 一个包在链路上飞行的时长
    pub flight_ms: u64,
    /// 吞吐率统计的尾部窗口
    pub throughput_window_ms: u64,
    pub history_capacity: usize,
    /// 相邻两个吞吐率采样的最小间隔
    pub history_min_gap_ms: u64,
    /// 倍率下限，避免间隔无限大
    pub min_rate: f64,
    /// 链路长度（渲染坐标单位）
    pub link_length: f64,
    pub sender_header: String,
    pub receiver_header: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 100,
            tick_step_ms: 100,
            flight_ms: 500,
            throughput_window_ms: 1_000,
            history_capacity: 120,
            history_min_gap_ms: 100,
            min_rate: 0.1,
            link_length: 15.0,
            sender_header: SENDER_HEADER.to_string(),
            receiver_header: RECEIVER_HEADER.to_string(),
        }
    }
}

impl ReplayConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ReplayConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_interval_ms == 0 {
            return Err(ConfigError::invalid("base_interval_ms", "must be > 0"));
        }
        if self.tick_step_ms == 0 {
            return Err(ConfigError::invalid("tick_step_ms", "must be > 0"));
        }
        if self.flight_ms == 0 {
            return Err(ConfigError::invalid("flight_ms", "must be > 0"));
        }
        if self.throughput_window_ms == 0 {
            return Err(ConfigError::invalid("throughput_window_ms", "must be > 0"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::invalid("history_capacity", "must be > 0"));
        }
        if !(self.min_rate.is_finite() && self.min_rate > 0.0) {
            return Err(ConfigError::invalid(
                "min_rate",
                format!("must be a positive number, got {}", self.min_rate),
            ));
        }
        if !(self.link_length.is_finite() && self.link_length > 0.0) {
            return Err(ConfigError::invalid(
                "link_length",
                format!("must be a positive number, got {}", self.link_length),
            ));
        }
        // 空前缀会匹配所有行
        if self.sender_header.is_empty() || self.receiver_header.is_empty() {
            return Err(ConfigError::invalid("sender_header", "headers must be non-empty"));
        }
        Ok(())
    }

    pub fn tick_step(&self) -> ReplayTime {
        ReplayTime::from_millis(self.tick_step_ms)
    }

    pub fn flight(&self) -> ReplayTime {
        ReplayTime::from_millis(self.flight_ms)
    }

    pub fn throughput_window(&self) -> ReplayTime {
        ReplayTime::from_millis(self.throughput_window_ms)
    }

    pub fn history_min_gap(&self) -> ReplayTime {
        ReplayTime::from_millis(self.history_min_gap_ms)
    }
}
