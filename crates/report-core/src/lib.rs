//! Compliance report PDF generation
//!
//! Lays out a set of compliance results as a paginated A4 report and encodes
//! it with lopdf.
//!
//! - `canvas` / `cursor`: page-addressable drawing surface and the vertical
//!   write position that decides page breaks
//! - `table`: grid tables with headers repeated after page breaks
//! - `sections`: title, executive summary, per-file blocks, recommendations
//! - `finalize`: footer pass that stamps `Page i of N`

pub mod canvas;
pub mod config;
pub mod cursor;
pub mod error;
pub mod finalize;
pub mod generator;
pub mod palette;
pub mod sections;
pub mod stats;
pub mod table;
pub mod text;

pub use canvas::{Align, Canvas, DocumentInfo, DrawOp, Page, TextStyle};
pub use config::{LayoutMetrics, ReportConfig};
pub use cursor::LayoutCursor;
pub use error::{ReportError, Result};
pub use generator::{
    generate, report_file_name, GeneratedReport, RenderedReport, ReportGenerator,
};
pub use palette::Rgb;
pub use shared_types::{ComplianceResult, ComplianceRule, OverallStatus, RuleStatus};
pub use stats::{RateBand, ReportStats};
pub use table::{Column, TableRenderer, TableStyle, TableSummary};

/// Parse PDF bytes and return the page count
pub fn page_count(bytes: &[u8]) -> Result<usize> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ReportError::Serialization(e.to_string()))?;
    Ok(doc.get_pages().len())
}
