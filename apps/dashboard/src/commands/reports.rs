//! Audit report export.

use stockwise_core::ReportFormat;

use crate::error::AppResult;
use crate::state::App;

/// Downloads the report into the export directory.
///
/// Report resource state is not touched; a failure is a one-shot notice.
pub(super) async fn export(app: &mut App, format: ReportFormat) -> AppResult<()> {
    let path = app.client().exporter.export(format).await?;
    app.success(format!("Report saved to {}", path.display()));
    Ok(())
}
