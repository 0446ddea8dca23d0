//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Export the stored résumé as a standalone HTML file
#[derive(Parser, Debug)]
#[command(name = "resume_cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite file holding the résumé slot (created on first use)
    pub db_path: PathBuf,

    /// Directory that receives the exported HTML file
    #[arg(default_value = ".")]
    pub out_dir: PathBuf,
}
