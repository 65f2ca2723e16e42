//! Server entry point.

use clap::Parser;
use log::{error, info};
use sheetmark_core::init_logging;
use sheetmark_server::{build_router, AppState, ServerArgs};
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={}", err);
            eprintln!("sheetmark-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ServerArgs) -> Result<(), Box<dyn Error>> {
    let paths = args.storage_paths();
    init_logging(args.log_level(), &args.log_dir(&paths)?)?;

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(
        "event=server_start module=server status=ok listen={} user_dir={} sheets_dir={}",
        args.listen,
        paths.user_dir.display(),
        paths.sheets_dir.display()
    );

    axum::serve(listener, build_router(AppState::from_paths(&paths)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            "event=server_signal module=server status=error error={}",
            err
        );
    }
}
