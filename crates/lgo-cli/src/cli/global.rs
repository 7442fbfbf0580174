use clap::ValueEnum;
use lgo_config::LgoConfig;
use lgo_core::enums::Language;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Language for species names and export headers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LangArg {
    Fr,
    En,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::Fr => Self::Fr,
            LangArg::En => Self::En,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub project: Option<String>,
    pub lang: Option<LangArg>,
}

impl GlobalFlags {
    /// `--lang` when given, otherwise the configured default.
    #[must_use]
    pub fn language(&self, config: &LgoConfig) -> Language {
        self.lang.map_or(config.general.language, Language::from)
    }
}
