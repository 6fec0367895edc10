//! CLI entry point for the tunefetch tool.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use tunefetch_core::csv_import::parse_csv;
use tunefetch_core::download::YtDlpDownloader;
use tunefetch_core::pipeline::{PipelineDriver, PipelineRun, RunState};
use tunefetch_core::resolver::YtDlpResolver;
use tunefetch_core::store::DownloadStore;

mod app_config;
mod cli;
mod exit_handler;
mod output;

use app_config::{Settings, load_default_file_config, merge_settings};
use cli::Args;
use exit_handler::{ProcessExit, run_exit_outcome};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let file_config = load_default_file_config()?;
    let settings = merge_settings(&args, file_config.as_ref());

    init_tracing(settings.log_level);
    debug!(?args, ?settings, "CLI arguments parsed");

    let outcome = run(&args, &settings).await?;
    Ok(outcome.into())
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn read_input_text(args: &Args) -> Result<String> {
    if !args.inputs.is_empty() {
        return Ok(args.inputs.join("\n"));
    }
    if io::stdin().is_terminal() || args.csv.is_some() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read input from stdin")?;
    Ok(buffer)
}

async fn run(args: &Args, settings: &Settings) -> Result<ProcessExit> {
    let input_text = read_input_text(args)?;

    let mut store = DownloadStore::new();
    store.set_audio_mode(settings.audio_mode);
    store.set_destination(settings.output_dir.clone());

    if let Some(csv_path) = &args.csv {
        let content = std::fs::read_to_string(csv_path)
            .with_context(|| format!("Failed to read CSV file '{}'", csv_path.display()))?;
        let import = parse_csv(&content, settings.audio_mode)
            .with_context(|| format!("Failed to import CSV file '{}'", csv_path.display()))?;
        if !args.quiet {
            output::print_csv_import_summary(&import);
        }
        store.set_input_text(input_text);
        store.import_csv(import)?;
    } else {
        if input_text.trim().is_empty() {
            output::print_quick_start_guidance();
            return Ok(ProcessExit::Success);
        }
        store.set_input_text(input_text);
        store.classify();
    }

    let counts = store.items().len();
    info!(
        items = counts,
        metadata = store.correlation().is_usable(),
        "Queue ready"
    );

    if let Some(dir) = store.destination() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output folder '{}'", dir.display()))?;
    }

    let resolver = YtDlpResolver::new(&settings.ytdlp_path).with_timeout(settings.search_timeout);
    let downloader = YtDlpDownloader::new(&settings.ytdlp_path)
        .with_ffmpeg_location(settings.ffmpeg_path.clone())
        .with_tagging(settings.tag_downloads);

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_signal = Arc::clone(&interrupted);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupted_signal.store(true, Ordering::SeqCst);
        }
    });

    let (updates_tx, updates_rx) = watch::channel(PipelineRun::default());
    let use_spinner = output::should_use_spinner(
        io::stderr().is_terminal(),
        args.quiet,
        output::is_dumb_terminal(),
    );
    let (progress_handle, progress_stop) = output::spawn_progress_ui(use_spinner, updates_rx);

    let driver = PipelineDriver::new(&resolver, &downloader)
        .with_updates(updates_tx)
        .with_interrupt(Arc::clone(&interrupted));
    let result = store.start_run(&driver).await.cloned();

    progress_stop.store(true, Ordering::SeqCst);
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }

    let run = result?;
    output::print_completion_summary(&run);

    if run.state == RunState::Interrupted {
        warn!(
            completed = run.completed_count(),
            total = run.total_count,
            "Interrupted before the queue finished"
        );
    }

    Ok(run_exit_outcome(&run))
}
