use std::path::PathBuf;

use anyhow::Context;
use lgo_config::{LgoConfig, PROJECT_DIR};
use lgo_store::LichenStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::resolve_in_project;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: PathBuf,
    config_path: PathBuf,
    config_written: bool,
    database_path: PathBuf,
}

/// Handle `lgo init`.
pub fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project_root = match &flags.project {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = init_project(project_root, args.force)?;
    output(&response, flags.format)
}

fn init_project(project_root: PathBuf, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = project_root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config_path = LgoConfig::project_config_path(&project_root);
    let config_written = force || !config_path.exists();
    if config_written {
        let rendered = LgoConfig::default().to_toml()?;
        std::fs::write(&config_path, rendered)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    } else {
        tracing::debug!(path = %config_path.display(), "keeping existing config");
    }

    let config = LgoConfig::load_from(&project_root)?;
    let database_path = resolve_in_project(&project_root, &config.store.database_path());
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    LichenStore::open_local(&database_path)
        .with_context(|| format!("failed to create store at {}", database_path.display()))?;

    Ok(InitResponse {
        project_root,
        config_path,
        config_written,
        database_path,
    })
}
