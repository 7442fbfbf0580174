use std::path::PathBuf;

use anyhow::Context;
use lgo_store::ExportFormat;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ExportResponse {
    path: PathBuf,
    file_format: ExportFormat,
    rows: usize,
    columns: usize,
}

/// Handle `lgo export`.
pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = ctx.dataset()?;
    let table = dataset.export_table(flags.language(&ctx.config));
    if table.is_empty() {
        tracing::warn!("no observation has sightings; export holds headers only");
    }

    let format = args.export_format();
    let spinner = Progress::spinner(&format!("writing {format} export"));
    let rows = ctx
        .store()
        .write_export(&table, &args.path, format)
        .with_context(|| format!("failed to write export to {}", args.path.display()))?;
    spinner.finish_clear();

    output(
        &ExportResponse {
            path: args.path.clone(),
            file_format: format,
            rows,
            columns: table.columns.len(),
        },
        flags.format,
    )
}
