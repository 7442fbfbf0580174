use std::path::Path;

use anyhow::Context;
use lgo_config::LgoConfig;

/// Load `.env` then the layered configuration for `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<LgoConfig> {
    load_project_dotenv(project_root)?;
    LgoConfig::load_from(project_root).with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
