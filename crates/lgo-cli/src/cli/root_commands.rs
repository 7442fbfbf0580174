use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use lgo_store::ExportFormat;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize lichensgo for a project.
    Init(InitArgs),
    /// Load survey CSV exports into the store.
    Import(ImportArgs),
    /// Table row counts and species missing ecology data.
    Status,
    /// Observation summaries with every index.
    Observations(ObservationsArgs),
    /// Drill down into one observation, by id or map coordinates.
    Observation(ObservationArgs),
    /// Species ranking, or the card of one species.
    Species(SpeciesArgs),
    /// Write the per-observation export table.
    Export(ExportArgs),
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `lgo init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml with defaults.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `lgo import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Directory holding observations.csv, trees.csv, lichens.csv, ...
    pub dir: PathBuf,
    /// Ecology reference CSV (defaults to `store.ecology_csv`).
    #[arg(long)]
    pub ecology: Option<PathBuf>,
    /// Empty every table before loading.
    #[arg(long)]
    pub replace: bool,
}

/// Arguments for `lgo observations`.
#[derive(Clone, Debug, Args)]
pub struct ObservationsArgs {
    /// Earliest observation date (inclusive), YYYY-MM-DD.
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Latest observation date (inclusive), YYYY-MM-DD.
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Only observations by this user.
    #[arg(long)]
    pub user: Option<i64>,
}

/// Arguments for `lgo observation`.
#[derive(Clone, Debug, Args)]
pub struct ObservationArgs {
    pub id: Option<i64>,
    #[arg(long, requires = "lon", conflicts_with = "id", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", conflicts_with = "id", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

/// Arguments for `lgo species`.
#[derive(Clone, Debug, Args)]
pub struct SpeciesArgs {
    /// Show traits and the presence map of this species.
    #[arg(long)]
    pub id: Option<i64>,
    /// List every known species sorted by name, sighted or not.
    #[arg(long, conflicts_with = "id")]
    pub all: bool,
}

/// File format written by `lgo export`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl From<FileFormat> for ExportFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Csv => Self::Csv,
            FileFormat::Parquet => Self::Parquet,
        }
    }
}

/// Arguments for `lgo export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    pub path: PathBuf,
    /// csv or parquet; inferred from the path extension when omitted.
    #[arg(long)]
    pub file_format: Option<FileFormat>,
}

impl ExportArgs {
    #[must_use]
    pub fn export_format(&self) -> ExportFormat {
        if let Some(format) = self.file_format {
            return format.into();
        }
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => ExportFormat::Parquet,
            _ => ExportFormat::Csv,
        }
    }
}

/// Arguments for `lgo schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: String,
}
