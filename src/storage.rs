use crate::errors::DashboardError;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Writes a rendered page snapshot, creating parent directories as needed.
pub async fn write_snapshot(path: &Path, html: &str) -> Result<(), DashboardError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, html).await?;
    info!(path = %path.display(), bytes = html.len(), "snapshot written");
    Ok(())
}
