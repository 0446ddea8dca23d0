//! Export entry point.
//!
//! # Responsibility
//! - Open the persisted résumé and write its standalone HTML export.
//! - Stay free of editing logic; all behavior lives in `resume_core`.
//!
//! Usage: `resume_cli <db_path> [out_dir]`

mod cli;

use clap::Parser;
use cli::Cli;
use resume_core::db::open_db;
use resume_core::{default_log_level, init_logging, ResumeService, SqliteSlotRepository};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let Cli { db_path, out_dir } = Cli::parse();

    if let Some(log_dir) = log_dir_for(&db_path) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let service = ResumeService::open(SqliteSlotRepository::new(&conn));
    match service.export().write_to_dir(&out_dir) {
        Ok(path) => {
            println!("resume_core version={}", resume_core::core_version());
            println!("exported {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to write export into {}: {err}", out_dir.display());
            ExitCode::FAILURE
        }
    }
}

/// Logs live in `logs/` next to the database file.
fn log_dir_for(db_path: &Path) -> Option<String> {
    let parent = db_path.parent().filter(|p| !p.as_os_str().is_empty());
    let base = match parent {
        Some(dir) => dir.canonicalize().ok()?,
        None => std::env::current_dir().ok()?,
    };
    base.join("logs").to_str().map(str::to_string)
}
