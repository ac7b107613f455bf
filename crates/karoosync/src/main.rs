use std::process::ExitCode;

use clap::Parser;
use karoosync::cli::{Args, init_logging, run};
use karoosync_client::config::Endpoints;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let today = chrono::Local::now().date_naive();
    match run(args, Endpoints::from_env(), today).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            eprintln!("karoosync: {e:#}");
            ExitCode::FAILURE
        }
    }
}
