//! # Report Export
//!
//! Downloads the audit report to a file.
//!
//! ```text
//! export(Csv)  ──► GET /reports/summary?format=csv ──► bytes as-is
//! export(Text) ──► GET /reports/summary            ──► report_summary text
//!                                                        │
//!                       <dir>/stockwise_report_<YYYY-MM-DD>.<ext>  ◄──┘
//! ```
//!
//! Exporting never touches the Report resource.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use stockwise_core::normalize::normalize_report;
use stockwise_core::ReportFormat;
use tracing::info;

use crate::error::ClientResult;
use crate::transport::{Api, ApiRequest};

/// File name for a report exported on `date`.
pub fn export_file_name(format: ReportFormat, date: NaiveDate) -> String {
    format!(
        "stockwise_report_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Writes report downloads into one directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    api: Api,
    directory: PathBuf,
}

impl ReportExporter {
    pub fn new(api: Api, directory: impl Into<PathBuf>) -> Self {
        Self {
            api,
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Exports with today's local date in the file name.
    pub async fn export(&self, format: ReportFormat) -> ClientResult<PathBuf> {
        self.export_on(format, chrono::Local::now().date_naive())
            .await
    }

    /// Exports with `date` in the file name.
    pub async fn export_on(&self, format: ReportFormat, date: NaiveDate) -> ClientResult<PathBuf> {
        let contents = match format {
            ReportFormat::Csv => {
                let request = ApiRequest::get("/reports/summary").query("format", "csv");
                self.api.execute("Report download", request).await?.body
            }
            ReportFormat::Text => {
                let response = self
                    .api
                    .execute("Report download", ApiRequest::get("/reports/summary"))
                    .await?;
                normalize_report(&response.body)?.report_summary.into_bytes()
            }
        };

        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(export_file_name(format, date));
        tokio::fs::write(&path, &contents).await?;

        info!(path = %path.display(), bytes = contents.len(), %format, "Report exported");
        Ok(path)
    }
}
