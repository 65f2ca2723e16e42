//! Command-line entry point.
//!
//! # Responsibility
//! - Keep the `ping` smoke probe for verifying `sheetmark_core` linkage.
//! - Offer backup export/import and sheet statistics without the server.

use chrono::Utc;
use clap::{Parser, Subcommand};
use sheetmark_core::config::resolve_data_root;
use sheetmark_core::{
    aggregate, default_log_level, init_logging, BackupService, FsDocumentStore, SheetLibrary,
    StatusService, StoragePaths, DATA_ROOT_ENV,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Local tracker for coding-practice sheets.
#[derive(Debug, Parser)]
#[command(name = "sheetmark", version, about)]
struct Cli {
    /// Directory holding `user/` and `sheets/` (defaults to `./data`).
    #[arg(long, global = true, env = DATA_ROOT_ENV)]
    data_root: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage and version.
    Ping,
    /// Write a backup archive of all user data.
    Export {
        /// Output file (defaults to the dated archive name in the current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Restore user data from a backup archive.
    Import {
        file: PathBuf,
    },
    /// Print progress statistics for one sheet.
    Stats {
        #[arg(long)]
        sheet: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sheetmark: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let paths = StoragePaths::from_root(resolve_data_root(cli.data_root.as_deref()));

    match cli.command {
        Command::Ping => {
            println!("sheetmark_core ping={}", sheetmark_core::ping());
            println!("sheetmark_core version={}", sheetmark_core::core_version());
        }
        Command::Export { out } => {
            start_logging(&paths)?;
            let store = FsDocumentStore::new(paths.user_dir.clone());
            let archive = BackupService::new(&store).export(Utc::now())?;
            let target = out.unwrap_or_else(|| PathBuf::from(&archive.file_name));
            std::fs::write(&target, &archive.bytes)?;
            println!(
                "exported {} ({} bytes)",
                target.display(),
                archive.bytes.len()
            );
        }
        Command::Import { file } => {
            start_logging(&paths)?;
            let data = std::fs::read(&file)?;
            let store = FsDocumentStore::new(paths.user_dir.clone());
            let report = BackupService::new(&store).import(&data, Utc::now())?;
            println!("backup date: {}", report.backup_date);
            for (resource, status) in &report.results {
                println!("{resource}: {}", status.label());
            }
        }
        Command::Stats { sheet } => {
            start_logging(&paths)?;
            let library = SheetLibrary::new(paths.sheets_dir.clone());
            let config = library.resolve(Some(sheet.as_str()))?;
            let unified = library.load_unified(config)?;
            let store = FsDocumentStore::new(paths.user_dir.clone());
            let statuses = StatusService::new(&store);
            let stats = aggregate(&unified, &statuses.completed(), &statuses.revision());

            println!("{} ({})", config.name, config.id);
            println!(
                "completed {}/{} ({}%), pending {}, in revision {}",
                stats.completed, stats.total, stats.percent, stats.pending, stats.in_revision
            );
            let buckets = [
                ("easy", stats.per_difficulty.easy),
                ("medium", stats.per_difficulty.medium),
                ("hard", stats.per_difficulty.hard),
            ];
            for (label, tally) in buckets {
                println!("  {label}: {}/{}", tally.completed, tally.total);
            }
        }
    }
    Ok(())
}

fn start_logging(paths: &StoragePaths) -> Result<(), Box<dyn Error>> {
    let level = std::env::var("SHEETMARK_LOG_LEVEL")
        .unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = if paths.log_dir.is_absolute() {
        paths.log_dir.clone()
    } else {
        std::env::current_dir()?.join(&paths.log_dir)
    };
    init_logging(&level, &log_dir)?;
    Ok(())
}
