//! Report color palette

use shared_types::OverallStatus;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// RGB floats in the 0-1 range used by PDF color operators
    pub fn components(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub const PRIMARY: Rgb = Rgb(10, 61, 98);
pub const SECONDARY: Rgb = Rgb(76, 175, 80);
pub const ACCENT: Rgb = Rgb(184, 115, 51);
pub const DESTRUCTIVE: Rgb = Rgb(212, 24, 61);
pub const WARNING: Rgb = Rgb(255, 152, 0);
pub const MUTED: Rgb = Rgb(113, 113, 130);
pub const BACKGROUND: Rgb = Rgb(245, 245, 245);

/// Unfilled part of the progress bar
pub const TRACK: Rgb = Rgb(220, 220, 220);
/// Table cell borders
pub const GRID: Rgb = Rgb(200, 200, 200);
/// Default body text
pub const TEXT: Rgb = Rgb(40, 40, 40);

/// Banner color for a document's aggregate status
pub fn status_color(status: OverallStatus) -> Rgb {
    match status {
        OverallStatus::Compliant => SECONDARY,
        OverallStatus::Warning => WARNING,
        OverallStatus::NonCompliant => DESTRUCTIVE,
    }
}

/// Text color for a cell carrying a status token.
///
/// Matching is case-sensitive; `None` means the default text color applies.
pub fn token_color(text: &str) -> Option<Rgb> {
    if text.contains("PASSED") {
        Some(SECONDARY)
    } else if text.contains("WARNING") {
        Some(WARNING)
    } else if text.contains("FAILED") {
        Some(DESTRUCTIVE)
    } else {
        None
    }
}
