//! Aggregate statistics over a result set

use crate::palette::{self, Rgb};
use serde::Serialize;
use shared_types::{ComplianceResult, OverallStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportStats {
    pub total_files: usize,
    pub compliant_files: usize,
    pub warning_files: usize,
    pub non_compliant_files: usize,
}

impl ReportStats {
    pub fn from_results(results: &[ComplianceResult]) -> Self {
        let mut stats = ReportStats {
            total_files: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.overall_status {
                OverallStatus::Compliant => stats.compliant_files += 1,
                OverallStatus::Warning => stats.warning_files += 1,
                OverallStatus::NonCompliant => stats.non_compliant_files += 1,
            }
        }
        stats
    }

    /// Percentage of fully compliant files, rounded half-up, in `0..=100`.
    /// An empty set has a rate of 0.
    pub fn compliance_rate(&self) -> u8 {
        if self.total_files == 0 {
            return 0;
        }
        let rate = (self.compliant_files * 200 + self.total_files) / (2 * self.total_files);
        rate.min(100) as u8
    }

    pub fn rate_band(&self) -> RateBand {
        RateBand::for_rate(self.compliance_rate())
    }
}

/// Color band of the compliance progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBand {
    /// 80% and above
    Good,
    /// 60% up to 79%
    Fair,
    /// Below 60%
    Poor,
}

impl RateBand {
    pub fn for_rate(rate: u8) -> Self {
        match rate {
            0..=59 => RateBand::Poor,
            60..=79 => RateBand::Fair,
            _ => RateBand::Good,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            RateBand::Good => palette::SECONDARY,
            RateBand::Fair => palette::WARNING,
            RateBand::Poor => palette::DESTRUCTIVE,
        }
    }
}
