use std::path::PathBuf;

use chrono::NaiveDate;
use lgo_store::TableCounts;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusResponse {
    project_root: PathBuf,
    database_path: PathBuf,
    counts: TableCounts,
    first_observation: Option<NaiveDate>,
    last_observation: Option<NaiveDate>,
    missing_ecology: Vec<String>,
}

/// Handle `lgo status`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let counts = ctx.store().table_counts()?;
    let dataset = ctx.dataset()?;
    let bounds = dataset.date_bounds();

    output(
        &StatusResponse {
            project_root: ctx.project_root.clone(),
            database_path: ctx.database_path.clone(),
            counts,
            first_observation: bounds.map(|(first, _)| first),
            last_observation: bounds.map(|(_, last)| last),
            missing_ecology: dataset.missing_ecology().to_vec(),
        },
        flags.format,
    )
}
