use crate::config::ReportConfig;
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    ReportConfig::starter().save_to(path)?;
    tracing::info!(path = %path.display(), "wrote starter report definition");
    Ok(())
}
