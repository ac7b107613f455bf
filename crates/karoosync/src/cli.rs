//! Command line surface of the `karoosync` binary.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use karoosync_client::config::Endpoints;
use karoosync_client::hammerhead::ReqwestHammerheadClient;
use karoosync_client::intervals::ReqwestIntervalsClient;

use crate::config::{DEFAULT_SETTINGS_FILE, Loaded, Settings, load_or_create};
use crate::error::SyncResult;
use crate::locate::SyncWindow;
use crate::sync::{SyncOutcome, SyncReport, Syncer, UploadMode, authenticate};

/// Sync planned rides from Intervals.icu to a Hammerhead Karoo.
#[derive(Debug, Parser)]
#[command(name = "karoosync", version, about)]
pub struct Args {
    /// Settings file. Created with placeholder values when missing.
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Sync the workouts of a single day (YYYY-MM-DD).
    #[arg(long, conflicts_with_all = ["oldest", "newest"])]
    pub date: Option<NaiveDate>,

    /// First day to sync (YYYY-MM-DD).
    #[arg(long)]
    pub oldest: Option<NaiveDate>,

    /// Last day to sync (YYYY-MM-DD).
    #[arg(long)]
    pub newest: Option<NaiveDate>,

    /// How workouts are sent to Hammerhead.
    #[arg(long, value_enum, default_value_t = UploadMode::Inline)]
    pub upload_mode: UploadMode,

    /// Keep a copy of each downloaded ZWO file in this directory.
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}

/// Configure logging from `KAROOSYNC_LOG_LEVEL` (or `RUST_LOG`, default `info`).
pub fn init_logging() {
    let log_env = std::env::var("KAROOSYNC_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    // Keep connection pool chatter quiet unless asked for explicitly.
    let combined_filter = format!("{log_env},hyper_util=warn,reqwest=warn");
    let env_filter = tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper_util=warn,reqwest=warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("karoosync: log filter: {}", log_env);
}

/// Pick the dates to sync.
///
/// `--date` wins, then `--oldest`/`--newest`, then the `[SYNC]` dates of the
/// settings file, and otherwise only `today`. When just one bound is given
/// the window is that single day.
pub fn resolve_window(args: &Args, settings: &Settings, today: NaiveDate) -> SyncResult<SyncWindow> {
    if let Some(date) = args.date {
        return Ok(SyncWindow::single(date));
    }
    let bounds = match (args.oldest, args.newest) {
        (None, None) => (settings.oldest_date, settings.newest_date),
        given => given,
    };
    match bounds {
        (Some(oldest), Some(newest)) => SyncWindow::new(oldest, newest),
        (Some(day), None) | (None, Some(day)) => Ok(SyncWindow::single(day)),
        (None, None) => Ok(SyncWindow::single(today)),
    }
}

/// One line of the per-workout report.
pub fn outcome_line(outcome: &SyncOutcome) -> String {
    let name = outcome.summary.name.as_deref().unwrap_or("unnamed workout");
    match &outcome.result {
        Ok(id) => format!(
            "ok     {} {} (event {}): created workout {}",
            outcome.summary.date, name, outcome.summary.id, id
        ),
        Err(e) => format!(
            "failed {} {} (event {}): {}",
            outcome.summary.date, name, outcome.summary.id, e
        ),
    }
}

fn print_report(report: &SyncReport) {
    if report.is_empty() {
        println!("No rides planned in this period, nothing to sync.");
        return;
    }
    for outcome in &report.outcomes {
        println!("{}", outcome_line(outcome));
    }
    println!(
        "Synced {} workout(s), {} failed.",
        report.succeeded(),
        report.failed()
    );
    if report.succeeded() > 0 {
        println!(
            "You should see the workouts on your Karoo now if you are in the Workouts menu. \
             Re-run karoosync if you are not, as a manual or automatic sync will delete them again."
        );
    }
}

/// How a run ended, when it did not fail outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The settings file was missing and a template was written.
    TemplateCreated,
    Synced { succeeded: usize, failed: usize },
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Synced { failed, .. } if failed > 0 => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        }
    }
}

/// Run a whole sync against `endpoints`.
///
/// Settings and login problems abort before any workout is touched.
pub async fn run(args: Args, endpoints: Endpoints, today: NaiveDate) -> anyhow::Result<RunStatus> {
    let settings = match load_or_create(&args.config)? {
        Loaded::Settings(s) => s,
        Loaded::TemplateCreated(path) => {
            println!(
                "Created {}. Add your user details to that file and run karoosync again.",
                path.display()
            );
            return Ok(RunStatus::TemplateCreated);
        }
    };
    let window = resolve_window(&args, &settings, today)?;

    let hammerhead = Arc::new(ReqwestHammerheadClient::new(&endpoints.hammerhead_base_url));
    let session = authenticate(hammerhead.as_ref(), &settings).await?;
    tracing::info!(user = %session.user_id, "logged in to hammerhead");

    let intervals = Arc::new(ReqwestIntervalsClient::new(
        &endpoints.intervals_base_url,
        settings.source_athlete_id.clone(),
        settings.source_api_key.clone(),
    ));
    let mut syncer = Syncer::new(intervals, hammerhead, session, args.upload_mode);
    if let Some(dir) = args.save_dir {
        syncer = syncer.with_save_dir(dir);
    }

    let report = syncer.run(window).await?;
    print_report(&report);
    Ok(RunStatus::Synced {
        succeeded: report.succeeded(),
        failed: report.failed(),
    })
}
