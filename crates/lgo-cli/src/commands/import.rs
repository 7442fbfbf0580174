use std::path::PathBuf;

use anyhow::Context;
use lgo_store::import::TableImport;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::{AppContext, resolve_in_project};
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ImportResponse {
    source_dir: PathBuf,
    replaced: bool,
    tables: Vec<TableImport>,
    total_rows: usize,
    rejected_rows: usize,
    ecology_file: Option<PathBuf>,
    ecology: Option<TableImport>,
}

/// Handle `lgo import`.
pub fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!("import directory '{}' does not exist", args.dir.display());
    }

    let store = ctx.store();
    let spinner = Progress::spinner("importing survey tables");

    if args.replace {
        store.clear().context("failed to clear the store")?;
    }

    let report = store
        .import_csv_dir(&args.dir)
        .with_context(|| format!("failed to import CSV files from {}", args.dir.display()))?;
    if report.tables.is_empty() {
        tracing::warn!(dir = %args.dir.display(), "no known CSV file found");
    }

    let ecology_file = args.ecology.clone().or_else(|| {
        ctx.config
            .store
            .ecology_csv()
            .map(|path| resolve_in_project(&ctx.project_root, &path))
    });
    let ecology = match &ecology_file {
        Some(path) => {
            spinner.set_message("importing ecology reference");
            let loaded = store
                .import_ecology_csv(path)
                .with_context(|| format!("failed to import ecology CSV {}", path.display()))?;
            Some(loaded)
        }
        None => None,
    };
    spinner.finish_clear();
    ctx.invalidate();

    output(
        &ImportResponse {
            source_dir: args.dir.clone(),
            replaced: args.replace,
            total_rows: report.total_rows(),
            rejected_rows: report.total_rejected(),
            tables: report.tables,
            ecology_file,
            ecology,
        },
        flags.format,
    )
}
