//! 日志转表格
//!
//! 读取 TCP 实验日志，按时间排序后输出 CSV 交接格式，或输出规范化后的日志行。

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tcplab_replay::config::ReplayConfig;
use tcplab_replay::log::{LogDecoder, render_line, to_tabular};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "log-to-csv", about = "把 TCP 实验日志转换为按时间排序的 CSV")]
struct Args {
    /// 日志文件路径
    #[arg(long)]
    log: PathBuf,

    /// 输出文件；不填则写到 stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// 输出规范化的日志行而不是 CSV
    #[arg(long, default_value_t = false)]
    normalized: bool,

    /// 回放配置（JSON），用于自定义标题前缀
    #[arg(long)]
    config: Option<PathBuf>,
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
    let cfg = match &args.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };

    let raw = fs::read(&args.log)?;
    let (events, stats) = LogDecoder::from_config(&cfg).decode_with_stats(&raw)?;

    let text = if args.normalized {
        let mut out = events.iter().map(render_line).collect::<Vec<_>>().join("\n");
        out.push('\n');
        out
    } else {
        to_tabular(&events)
    };

    match &args.out {
        Some(path) => {
            fs::write(path, text)?;
            info!(path = %path.display(), events = stats.events, "已写出");
        }
        None => print!("{text}"),
    }
    Ok(())
}
