use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect the endat data-acquisition configuration", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the section names of the merged configuration
    Sections,
    /// Print one configuration value
    Get {
        /// Section name, e.g. "coastdat"
        section: String,
        /// Key name, e.g. "file_pattern"
        key: String,
    },
    /// Dump the merged configuration
    Show {
        /// Restrict the dump to one section
        #[arg(long)]
        section: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
    /// Print the composed data paths and path patterns
    Paths {
        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
    /// Validate path composition and the postGIS section
    Check,
    /// Write a user override template into the configuration directory
    Init {
        /// Write to this file instead of the user configuration directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Json,
}
