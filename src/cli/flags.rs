use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::telemetry::DEFAULT_USER_AGENT;
use crate::core::types::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "securecheck",
    version,
    about = "URL security analyzer with shareable reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (TOML). Default: config/securecheck.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Report language (en, es, fr, ... or a tag such as es-MX)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// SQLite path for client id, events and disputes
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Log file path
    #[arg(long, global = true, default_value = "data/securecheck.log")]
    pub log_file: String,

    /// Increase verbosity (info, debug, trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not record analytics events
    #[arg(long, global = true)]
    pub no_telemetry: bool,

    /// User agent reported in analytics events
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a URL and print its security report
    Analyze {
        url: String,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormatArg>,
        /// Write the report to this path (file or directory)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print a shareable link for the report
        #[arg(long)]
        share: bool,
        /// Seed the random source for a reproducible report
        #[arg(long)]
        seed: Option<u64>,
        /// Override the simulated analysis delay
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Open a shared report link or token
    View {
        link: String,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormatArg>,
        /// Write the report to this path (file or directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Disagree with a shared report's result
    Dispute {
        link: String,
        /// Why the result is wrong
        #[arg(long)]
        reason: String,
    },
    /// Print locally stored analytics events as JSONL
    Events {
        /// Only the most recent N events
        #[arg(long)]
        limit: Option<usize>,
        /// Print aggregate counts instead of raw events
        #[arg(long)]
        summary: bool,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Analyze { .. } => "analyze",
            Command::View { .. } => "view",
            Command::Dispute { .. } => "dispute",
            Command::Events { .. } => "events",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormatArg {
    Json,
    Markdown,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "securecheck",
            "analyze",
            "https://example.com",
            "--lang",
            "es",
            "--seed",
            "7",
            "--no-telemetry",
        ])
        .unwrap();
        assert_eq!(cli.lang.as_deref(), Some("es"));
        assert!(cli.no_telemetry);
        match cli.command {
            Command::Analyze { url, seed, .. } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(seed, Some(7));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn dispute_requires_reason() {
        assert!(Cli::try_parse_from(["securecheck", "dispute", "abc"]).is_err());
    }
}
