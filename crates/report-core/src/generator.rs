//! Report generation entry points
//!
//! Generation is two-phase: the content pass lays out every section without
//! footers, then [`finalize::stamp_footers`] revisits each page once the page
//! count is known. Each call owns its canvas and cursor; nothing is shared
//! between calls.

use crate::canvas::{Canvas, DocumentInfo};
use crate::config::ReportConfig;
use crate::cursor::LayoutCursor;
use crate::error::{ReportError, Result};
use crate::finalize;
use crate::sections::{file_block, recommendations, summary, title};
use crate::stats::ReportStats;
use crate::table::TableSummary;
use chrono::{DateTime, Utc};
use shared_types::ComplianceResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Laid-out pages before serialization
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub canvas: Canvas,
    pub stats: ReportStats,
    /// One entry per result, in input order
    pub tables: Vec<TableSummary>,
}

/// A serialized report ready to be written out
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub page_count: usize,
    pub stats: ReportStats,
}

impl GeneratedReport {
    /// Write the report into `dir` under its file name.
    ///
    /// The bytes go to a uniquely named temporary file in `dir` that is then
    /// renamed into place, so a failed or concurrent write never exposes a
    /// partial report.
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let target = dir.join(&self.file_name);

        let mut staging = NamedTempFile::new_in(dir)?;
        staging.write_all(&self.bytes)?;
        staging.as_file().sync_all()?;
        staging.persist(&target).map_err(|e| ReportError::Io(e.error))?;

        tracing::info!("Wrote {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

/// `Compliance_Report_<YYYY-MM-DD>.pdf` for the generation date
pub fn report_file_name(generated_at: &DateTime<Utc>) -> String {
    format!("Compliance_Report_{}.pdf", generated_at.format("%Y-%m-%d"))
}

/// PDF date string for the document info dictionary
pub fn pdf_date(generated_at: &DateTime<Utc>) -> String {
    generated_at.format("D:%Y%m%d%H%M%SZ").to_string()
}

#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Lay out the report for `results`.
    ///
    /// Returns `Ok(None)` when there is nothing to report.
    pub fn render(
        &self,
        results: &[ComplianceResult],
        generated_at: &DateTime<Utc>,
    ) -> Result<Option<RenderedReport>> {
        if results.is_empty() {
            tracing::info!("No results supplied, skipping report generation");
            return Ok(None);
        }

        self.config.validate()?;
        if self.config.validate_status {
            for result in results {
                result.check_status()?;
            }
        }

        let layout = &self.config.layout;
        let stats = ReportStats::from_results(results);
        tracing::debug!(
            "Rendering report for {} files ({}% compliant)",
            stats.total_files,
            stats.compliance_rate()
        );

        let mut canvas = Canvas::new(layout.page_width, layout.page_height);
        let mut cursor =
            LayoutCursor::new(layout.page_height, layout.top_margin, layout.bottom_margin);

        title::render(&mut canvas, &mut cursor, &self.config, generated_at);
        summary::render(&mut canvas, &mut cursor, layout, &stats);

        let tables = results
            .iter()
            .enumerate()
            .map(|(index, result)| {
                file_block::render(&mut canvas, &mut cursor, layout, index, result)
            })
            .collect();

        recommendations::render(&mut canvas, &mut cursor, layout, &self.config.recommendations);
        finalize::stamp_footers(&mut canvas, &self.config);

        Ok(Some(RenderedReport {
            canvas,
            stats,
            tables,
        }))
    }

    /// Lay out and serialize the report for `results`.
    ///
    /// Returns `Ok(None)` when there is nothing to report. Serialization
    /// failures are returned as-is and no bytes are produced.
    pub fn generate(
        &self,
        results: &[ComplianceResult],
        generated_at: &DateTime<Utc>,
    ) -> Result<Option<GeneratedReport>> {
        let Some(rendered) = self.render(results, generated_at)? else {
            return Ok(None);
        };

        let info = DocumentInfo {
            title: format!("{} {}", self.config.title, self.config.subtitle),
            producer: self.config.product_name.clone(),
            creation_date: pdf_date(generated_at),
        };
        let bytes = rendered
            .canvas
            .to_pdf(&info, self.config.compress_streams)?;

        let report = GeneratedReport {
            bytes,
            file_name: report_file_name(generated_at),
            page_count: rendered.canvas.page_count(),
            stats: rendered.stats,
        };
        tracing::info!(
            "Generated {}: {} pages, {} bytes, {} files, {}% compliant",
            report.file_name,
            report.page_count,
            report.bytes.len(),
            report.stats.total_files,
            report.stats.compliance_rate()
        );
        Ok(Some(report))
    }
}

/// Generate a report with the default configuration
pub fn generate(
    results: &[ComplianceResult],
    generated_at: &DateTime<Utc>,
) -> Result<Option<GeneratedReport>> {
    ReportGenerator::default().generate(results, generated_at)
}
