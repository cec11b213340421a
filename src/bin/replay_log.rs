//! 无界面回放
//!
//! 加载日志后从范围起点开始播放，直到范围终点或达到 tick 上限；
//! 每一帧都可以写入 JSON 文件供渲染端离线读取。

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tcplab_replay::config::ReplayConfig;
use tcplab_replay::log::ErrorKind;
use tcplab_replay::replay::{ReplayState, Trigger};
use tcplab_replay::timeline::ReplayTime;
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(name = "replay-log", about = "无界面回放 TCP 实验日志并输出每一帧快照")]
struct Args {
    /// 日志文件路径
    #[arg(long)]
    log: PathBuf,

    /// 回放配置（JSON）；不填使用默认值
    #[arg(long)]
    config: Option<PathBuf>,

    /// 播放倍率（只影响墙钟间隔）
    #[arg(long, default_value_t = 1.0)]
    rate: f64,

    /// 范围起点（秒）
    #[arg(long)]
    from: Option<f64>,

    /// 范围终点（秒）
    #[arg(long)]
    to: Option<f64>,

    /// 最多播放多少个 tick；不填则播放到范围终点
    #[arg(long)]
    ticks: Option<u64>,

    /// 覆盖每个 tick 推进的回放时间（毫秒）
    #[arg(long)]
    tick_step_ms: Option<u64>,

    /// 输出所有帧的 JSON 数组
    #[arg(long)]
    frames_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    if let Err(err) = run(Args::parse()) {
        error!(error = %err, "运行失败");
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };
    if let Some(step) = args.tick_step_ms {
        cfg.tick_step_ms = step;
    }
    let mut replay = ReplayState::new(cfg)?;
    let interval_ms = replay.set_rate(args.rate);

    let raw = fs::read(&args.log)?;
    let dataset = replay.load(&raw)?;
    let max_time = dataset.times.last().copied().unwrap_or(0.0);
    info!(events = dataset.records.len(), max_time_s = max_time, interval_ms, "▶️  开始回放");

    let lo = args.from.map(ReplayTime::from_secs_f64).unwrap_or(ReplayTime::ZERO);
    let hi = args
        .to
        .map(ReplayTime::from_secs_f64)
        .unwrap_or(ReplayTime::from_secs_f64(max_time));
    if let Some((lo, hi)) = replay.set_range(lo, hi) {
        debug!(lo_ms = lo.as_millis(), hi_ms = hi.as_millis(), "范围子窗口");
    }

    let mut frames = Vec::new();
    if let Some(frame) = replay.seek(lo) {
        frames.push(frame);
    }
    replay.toggle_play();

    let mut ticks = 0_u64;
    while args.ticks.is_none_or(|limit| ticks < limit) && !replay.at_range_end() {
        let Some(frame) = replay.advance_or_seek(Trigger::Tick) else {
            break;
        };
        ticks += 1;
        frames.push(frame);
    }
    replay.toggle_play();

    if let Some(path) = &args.frames_json {
        let json = serde_json::to_string_pretty(&frames)?;
        fs::write(path, json)?;
        eprintln!("wrote {} frames to {}", frames.len(), path.display());
    }

    let Some(session) = replay.session() else {
        return Ok(());
    };
    let buckets = session.buckets();
    let bucket_counts = ErrorKind::ALL
        .iter()
        .map(|kind| format!("{kind}={}", buckets.bucket(*kind).len()))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "done @ cursor={:.3}s ticks={} interval_ms={}\n  buckets: {}\n  throughput: samples={}, last={:?}, max_ack={:?}",
        session.cursor().as_secs_f64(),
        ticks,
        interval_ms,
        bucket_counts,
        session.history().len(),
        session.history().last().map(|s| s.throughput),
        session.max_ack(),
    );
    Ok(())
}
