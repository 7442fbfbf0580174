use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, LangArg, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `lgo` binary.
#[derive(Debug, Parser)]
#[command(name = "lgo", version, about = "LichensGo - lichen survey indices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .lichensgo)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Language for species names and export headers (defaults to config)
    #[arg(long, global = true)]
    pub lang: Option<LangArg>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
            lang: self.lang,
        }
    }
}
