use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rsreport")]
#[command(about = "Assemble self-contained HTML reports from project databases", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a report from a SQLite database
    Report {
        /// Database the report queries run against
        database: PathBuf,

        /// Destination HTML file (replaced if it exists)
        output: PathBuf,

        /// Project descriptor XML supplying the header and layers
        #[arg(long)]
        project: Option<PathBuf>,

        /// Report definition (defaults to rsreport.toml next to the database)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extra stylesheet, may be repeated
        #[arg(long)]
        css: Vec<PathBuf>,
    },

    /// Write a starter report definition
    Init {
        #[arg(default_value = "rsreport.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
