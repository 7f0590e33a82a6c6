use std::path::PathBuf;

use clap::Parser;

/// Classify a failed vCloud HTTP exchange.
#[derive(Debug, Clone, Parser)]
#[command(name = "vcloud-classify", version, about)]
pub struct Cli {
    /// Request method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Absolute request URL
    #[arg(long)]
    pub url: String,

    /// Response status code
    #[arg(long)]
    pub status: u16,

    /// Response reason phrase (defaults to the canonical one)
    #[arg(long)]
    pub reason: Option<String>,

    /// Declared content type of the response body
    #[arg(long)]
    pub content_type: Option<String>,

    /// File holding the response body
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Directory containing vcloud.toml
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Directory for vcloud-classify.log (defaults to the temp dir)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
