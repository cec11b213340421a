//! 回放状态机
//!
//! 状态：Idle（未加载）-> Loaded（已加载，游标为 0，暂停）⇄ Playing ⇄ Paused。
//!
//! - 加载新日志会整体替换会话（时间轴、错误桶、吞吐率历史一起丢弃），从不部分重置。
//! - 播放时每个 tick 推进固定的 `tick_step`；倍率只改变 tick 的墙钟间隔。
//! - 播放中到达的拖动请求被忽略：自动播放优先，避免两者争夺游标。
//! - 游标始终被钳制在范围子窗口 `[range_lo, range_hi]` 内，越界请求不报错。

use super::buckets::ErrorBuckets;
use super::packet::ActivePacket;
use super::throughput::{ThroughputHistory, ThroughputSample, trailing_rate};
use crate::config::ReplayConfig;
use crate::error::{ConfigError, DecodeError};
use crate::log::{Event, EventKind, LogDecoder};
use crate::snapshot::{Frame, build_snapshot};
use crate::timeline::{ReplayTime, Timeline};
use serde::Serialize;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Idle,
    Loaded,
    Playing,
    Paused,
}

/// 一次更新的触发源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 定时器 tick
    Tick,
    /// 用户拖动时间滑块
    Scrub(ReplayTime),
}

/// 加载结果：相对时间（秒）与排好序的事件
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub times: Vec<f64>,
    pub records: Vec<Event>,
}

/// 与当前已加载日志绑定的全部可变状态
#[derive(Debug, Clone)]
pub struct Session {
    timeline: Timeline,
    cursor: ReplayTime,
    range: (ReplayTime, ReplayTime),
    buckets: ErrorBuckets,
    history: ThroughputHistory,
    active: Vec<ActivePacket>,
    max_ack: Option<u64>,
}

impl Session {
    fn new(timeline: Timeline, cfg: &ReplayConfig) -> Self {
        let range = (ReplayTime::ZERO, timeline.max_time());
        Self {
            timeline,
            cursor: ReplayTime::ZERO,
            range,
            buckets: ErrorBuckets::default(),
            history: ThroughputHistory::new(cfg.history_capacity, cfg.history_min_gap()),
            active: Vec::new(),
            max_ack: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cursor(&self) -> ReplayTime {
        self.cursor
    }

    pub fn range(&self) -> (ReplayTime, ReplayTime) {
        self.range
    }

    pub fn buckets(&self) -> &ErrorBuckets {
        &self.buckets
    }

    pub fn history(&self) -> &ThroughputHistory {
        &self.history
    }

    /// 最近一次更新得到的包记录（整个前缀）
    pub fn active_packets(&self) -> &[ActivePacket] {
        &self.active
    }

    /// 最近一次处理的前缀中最大的 ACK 序号
    pub fn max_ack(&self) -> Option<u64> {
        self.max_ack
    }

    /// 在 `cursor` 处重建前缀视图，并累积错误桶与吞吐率历史
    fn recompute(&mut self, cursor: ReplayTime, cfg: &ReplayConfig) {
        self.cursor = cursor;
        let prefix = self.timeline.query_upto(cursor);
        let flight = cfg.flight();

        let mut active = Vec::with_capacity(prefix.len());
        let mut max_ack: Option<u64> = None;
        for entry in prefix {
            let pkt = ActivePacket::from_entry(entry, flight);
            if entry.event.kind == EventKind::Ack && max_ack.is_none_or(|m| pkt.seq > m) {
                max_ack = Some(pkt.seq);
                let purged = self.buckets.purge_upto(pkt.seq);
                if purged > 0 {
                    trace!(ack = pkt.seq, purged, "累计确认清理错误桶");
                }
            }
            // 已被累计确认覆盖的序号不再入桶
            if pkt.error.is_some() && !max_ack.is_some_and(|m| pkt.seq <= m) {
                self.buckets.insert(pkt.clone());
            }
            active.push(pkt);
        }

        let throughput = trailing_rate(prefix, cursor, cfg.throughput_window());
        self.history.push(ThroughputSample {
            time: cursor,
            throughput,
        });

        debug!(
            cursor_ms = cursor.as_millis(),
            prefix = prefix.len(),
            buckets = self.buckets.len(),
            throughput,
            "回放更新"
        );
        self.active = active;
        self.max_ack = max_ack;
    }
}

/// 回放状态对象：由外部定时器与用户操作顺序驱动
#[derive(Debug, Clone)]
pub struct ReplayState {
    cfg: ReplayConfig,
    play: PlayState,
    rate: f64,
    session: Option<Session>,
}

impl Default for ReplayState {
    fn default() -> Self {
        Self::with_checked_config(ReplayConfig::default())
    }
}

impl ReplayState {
    /// 配置不合法时返回 [`ConfigError`]
    pub fn new(cfg: ReplayConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::with_checked_config(cfg))
    }

    fn with_checked_config(cfg: ReplayConfig) -> Self {
        Self {
            cfg,
            play: PlayState::Idle,
            rate: 1.0,
            session: None,
        }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.cfg
    }

    pub fn play_state(&self) -> PlayState {
        self.play
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn cursor(&self) -> Option<ReplayTime> {
        self.session.as_ref().map(|s| s.cursor)
    }

    /// 解码并加载一份日志。失败时保留原有状态。
    #[tracing::instrument(skip(self, raw), fields(bytes = raw.len()))]
    pub fn load(&mut self, raw: &[u8]) -> Result<Dataset, DecodeError> {
        let events = LogDecoder::from_config(&self.cfg).decode(raw)?;
        Ok(self.load_events(events))
    }

    /// 加载已解析好的事件，整体替换当前会话
    pub fn load_events(&mut self, events: Vec<Event>) -> Dataset {
        let timeline = Timeline::build(events);
        let dataset = Dataset {
            times: timeline.times_secs(),
            records: timeline.events().cloned().collect(),
        };
        info!(
            events = timeline.len(),
            max_time_s = timeline.max_time().as_secs_f64(),
            "📂 加载日志"
        );
        self.session = Some(Session::new(timeline, &self.cfg));
        self.play = PlayState::Loaded;
        dataset
    }

    /// 播放/暂停切换；Idle 下无效
    pub fn toggle_play(&mut self) -> PlayState {
        self.play = match self.play {
            PlayState::Idle => PlayState::Idle,
            PlayState::Loaded | PlayState::Paused => PlayState::Playing,
            PlayState::Playing => PlayState::Paused,
        };
        debug!(state = ?self.play, "切换播放状态");
        self.play
    }

    /// 暂停并回到范围起点
    pub fn stop(&mut self) -> Option<Frame> {
        if self.play == PlayState::Idle {
            return None;
        }
        self.play = PlayState::Paused;
        let lo = self.session.as_ref()?.range.0;
        self.refresh_at(lo)
    }

    /// 设置播放倍率，返回 tick 的墙钟间隔（毫秒）
    pub fn set_rate(&mut self, multiplier: f64) -> u64 {
        self.rate = multiplier.max(self.cfg.min_rate);
        self.tick_interval_ms()
    }

    pub fn tick_interval_ms(&self) -> u64 {
        (self.cfg.base_interval_ms as f64 / self.rate) as u64
    }

    /// 调整范围子窗口，钳制到 `[0, max_time]`，颠倒时交换；游标随之钳制。
    pub fn set_range(&mut self, lo: ReplayTime, hi: ReplayTime) -> Option<(ReplayTime, ReplayTime)> {
        let session = self.session.as_mut()?;
        let max = session.timeline.max_time();
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        session.range = (lo.min(max), hi.min(max));
        session.cursor = session.cursor.clamp_to(session.range.0, session.range.1);
        Some(session.range)
    }

    /// 显式拖动：等价于 `advance_or_seek(Trigger::Scrub(t))`
    pub fn seek(&mut self, t: ReplayTime) -> Option<Frame> {
        self.advance_or_seek(Trigger::Scrub(t))
    }

    /// 以秒为单位拖动；负数钳制到 0
    pub fn seek_secs(&mut self, t: f64) -> Option<Frame> {
        self.seek(ReplayTime::from_secs_f64(t))
    }

    /// 一次更新。返回 `None` 表示无需重绘（未加载，或播放中收到拖动）。
    pub fn advance_or_seek(&mut self, trigger: Trigger) -> Option<Frame> {
        let session = self.session.as_ref()?;
        let (lo, hi) = session.range;
        let requested = match (trigger, self.play) {
            (_, PlayState::Idle) => return None,
            (Trigger::Scrub(t), PlayState::Playing) => {
                trace!(requested_ms = t.as_millis(), "播放中忽略拖动");
                return None;
            }
            (Trigger::Scrub(t), _) => t,
            (Trigger::Tick, PlayState::Playing) => {
                session.cursor.saturating_add(self.cfg.tick_step()).min(hi)
            }
            (Trigger::Tick, _) => session.cursor,
        };
        self.refresh_at(requested.clamp_to(lo, hi))
    }

    fn refresh_at(&mut self, cursor: ReplayTime) -> Option<Frame> {
        let session = self.session.as_mut()?;
        session.recompute(cursor, &self.cfg);
        Some(build_snapshot(
            session.cursor,
            &session.active,
            &session.buckets,
            &session.history,
            &self.cfg,
        ))
    }

    /// 游标已到达范围终点
    pub fn at_range_end(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.cursor >= s.range.1)
    }
}
