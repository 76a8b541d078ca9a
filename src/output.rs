use crate::models::ListingDetail;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Write the collected details, or skip the file when there are none.
///
/// Returns `None` when nothing was written.
pub fn save_results(path: impl AsRef<Path>, details: &[ListingDetail]) -> Result<Option<usize>> {
    let path = path.as_ref();
    if details.is_empty() {
        info!("No apartment details collected, CSV file not created");
        return Ok(None);
    }

    info!("Saving results to {}...", path.display());
    write_csv(path, details).map(Some)
}

/// Write `details` as CSV with a header row of field names.
///
/// Returns the number of data rows written.
pub fn write_csv(path: impl AsRef<Path>, details: &[ListingDetail]) -> Result<usize> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    for detail in details {
        writer
            .serialize(detail)
            .with_context(|| format!("Failed to write row for {}", detail.url))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file {}", path.display()))?;

    Ok(details.len())
}
