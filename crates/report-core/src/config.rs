//! Report configuration
//!
//! Every field has a default reproducing the standard compliance report, so a
//! configuration document only needs to name what it overrides.

use crate::canvas::{A4_HEIGHT_MM, A4_WIDTH_MM};
use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Page geometry and element sizes, all in millimetres (font sizes in points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right content margin
    pub margin_x: f32,
    /// Where content starts on continuation pages
    pub top_margin: f32,
    /// Distance from the page bottom that content must stay above
    pub bottom_margin: f32,
    pub title_height: f32,
    pub footer_height: f32,
    pub summary_box_height: f32,
    pub stat_tile_width: f32,
    pub stat_tile_height: f32,
    pub stat_tile_pitch: f32,
    pub progress_bar_width: f32,
    pub progress_bar_height: f32,
    pub banner_height: f32,
    /// Space between a file banner and its table
    pub banner_gap: f32,
    /// Space after each file's table
    pub section_gap: f32,
    pub recommendations_band_height: f32,
    pub recommendation_line_height: f32,
    pub recommendation_spacing: f32,
    pub table_header_font_size: f32,
    pub table_body_font_size: f32,
    pub table_cell_padding: f32,
    pub table_line_spacing: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH_MM,
            page_height: A4_HEIGHT_MM,
            margin_x: 15.0,
            top_margin: 20.0,
            bottom_margin: 30.0,
            title_height: 40.0,
            footer_height: 24.0,
            summary_box_height: 25.0,
            stat_tile_width: 35.0,
            stat_tile_height: 12.0,
            stat_tile_pitch: 40.0,
            progress_bar_width: 150.0,
            progress_bar_height: 8.0,
            banner_height: 15.0,
            banner_gap: 5.0,
            section_gap: 15.0,
            recommendations_band_height: 25.0,
            recommendation_line_height: 5.0,
            recommendation_spacing: 3.0,
            table_header_font_size: 9.0,
            table_body_font_size: 8.0,
            table_cell_padding: 2.0,
            table_line_spacing: 1.15,
        }
    }
}

impl LayoutMetrics {
    /// Width available between the side margins
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_x
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("title_height", self.title_height),
            ("summary_box_height", self.summary_box_height),
            ("banner_height", self.banner_height),
            ("stat_tile_width", self.stat_tile_width),
            ("stat_tile_height", self.stat_tile_height),
            ("stat_tile_pitch", self.stat_tile_pitch),
            ("progress_bar_width", self.progress_bar_width),
            ("progress_bar_height", self.progress_bar_height),
            ("recommendations_band_height", self.recommendations_band_height),
            ("recommendation_line_height", self.recommendation_line_height),
            ("table_header_font_size", self.table_header_font_size),
            ("table_body_font_size", self.table_body_font_size),
            ("table_line_spacing", self.table_line_spacing),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ReportError::Config(format!("{} must be positive", name)));
            }
        }

        let non_negative = [
            ("margin_x", self.margin_x),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("footer_height", self.footer_height),
            ("banner_gap", self.banner_gap),
            ("section_gap", self.section_gap),
            ("recommendation_spacing", self.recommendation_spacing),
            ("table_cell_padding", self.table_cell_padding),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ReportError::Config(format!("{} must not be negative", name)));
            }
        }

        if self.content_width() <= 0.0 {
            return Err(ReportError::Config(format!(
                "margin_x {} leaves no content width on a {}mm page",
                self.margin_x, self.page_width
            )));
        }
        if self.top_margin + self.bottom_margin >= self.page_height {
            return Err(ReportError::Config(format!(
                "margins ({} + {}) leave no body area on a {}mm page",
                self.top_margin, self.bottom_margin, self.page_height
            )));
        }
        if self.title_height >= self.page_height - self.bottom_margin {
            return Err(ReportError::Config(format!(
                "title_height {} does not fit above the bottom margin",
                self.title_height
            )));
        }
        if self.footer_height > self.bottom_margin {
            return Err(ReportError::Config(format!(
                "footer_height {} exceeds bottom_margin {}; footers would cover content",
                self.footer_height, self.bottom_margin
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub subtitle: String,
    /// Short mark drawn in the title band logo tile
    pub brand_mark: String,
    /// Written as the PDF producer
    pub product_name: String,
    /// Contact lines drawn in every footer band
    pub footer_lines: Vec<String>,
    pub recommendations: Vec<String>,
    /// Reject results whose declared status disagrees with their rules
    pub validate_status: bool,
    /// Flate-compress page content streams
    pub compress_streams: bool,
    pub layout: LayoutMetrics,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "ARCHITECTURAL PLANS".to_string(),
            subtitle: "COMPLIANCE REPORT".to_string(),
            brand_mark: "AP".to_string(),
            product_name: "Architectural Plans Compliance Checker".to_string(),
            footer_lines: vec![
                "Architectural Plans Compliance Checker".to_string(),
                "Professional Building Compliance Analysis".to_string(),
                "Contact: info@compliancechecker.com | www.compliancechecker.com".to_string(),
            ],
            recommendations: vec![
                "Review and address all non-compliant items before proceeding with construction"
                    .to_string(),
                "Consult with a structural engineer for any load-bearing modifications".to_string(),
                "Obtain necessary permits from local planning authority".to_string(),
                "Schedule follow-up compliance check after revisions".to_string(),
                "Keep all documentation for future reference and inspections".to_string(),
            ],
            validate_status: false,
            compress_streams: true,
            layout: LayoutMetrics::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(s: &str) -> Result<Self> {
        let config: ReportConfig =
            serde_json::from_str(s).map_err(|e| ReportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}
