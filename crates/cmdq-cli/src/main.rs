use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tokio::time::sleep;
use tracing::info;

use cmdq_core::observability::init_tracing;
use cmdq_core::{
    Command, CommandQueue, QueueStatus, StopMode, WorkerConfig, WorkerHandle, WorkerReport,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Demo driver for the single-consumer command queue", long_about = None)]
struct Cli {
    /// Print commands enqueued before the stop request
    #[arg(long, default_value_t = 3)]
    messages: u32,

    /// Print commands enqueued after the stop request
    #[arg(long, default_value_t = 2)]
    after_stop: u32,

    /// Time each print command sleeps after printing
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Which stop to request
    #[arg(long, value_enum, default_value_t = StopArg::Soft)]
    stop: StopArg,

    /// Path to a JSON worker config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print the final queue status and worker report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StopArg {
    Soft,
    Hard,
}

impl From<StopArg> for StopMode {
    fn from(arg: StopArg) -> Self {
        match arg {
            StopArg::Soft => StopMode::Soft,
            StopArg::Hard => StopMode::Hard,
        }
    }
}

/// Prints a message, then holds the worker for `delay`.
struct PrintCommand {
    msg: String,
    delay: Duration,
}

impl Command for PrintCommand {
    fn execute(&mut self) {
        println!("{}", self.msg);
        std::thread::sleep(self.delay);
    }

    fn name(&self) -> &str {
        "print"
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    queue: QueueStatus,
    report: WorkerReport,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = match &cli.config {
        Some(path) => WorkerConfig::load(path)?,
        None => WorkerConfig::default(),
    };
    let delay = Duration::from_millis(cli.delay_ms);

    // (A) Queue と worker を用意
    let queue = Arc::new(CommandQueue::new());
    let worker = WorkerHandle::spawn(Arc::clone(&queue), &config)?;

    // (B) コマンド投入
    for n in 1..=cli.messages {
        queue.enqueue(PrintCommand {
            msg: format!("Hello {n}"),
            delay,
        });
    }

    // (C) 少し流してから停止要求
    sleep(delay * 2).await;
    let mode = StopMode::from(cli.stop);
    info!(?mode, "requesting stop");
    worker.request_stop(mode);

    // (D) 停止要求の後にも積む（soft なら drain される、hard なら捨てられる）
    for n in 1..=cli.after_stop {
        queue.enqueue(PrintCommand {
            msg: format!("Hello {}", cli.messages + n),
            delay,
        });
    }

    // (E) worker の終了を待つ
    let report = worker.wait().await?;
    info!(
        executed = report.executed,
        failed = report.failed,
        discarded = queue.len(),
        "worker finished"
    );

    if cli.json {
        let summary = Summary {
            queue: queue.status(),
            report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
