//! Section builders
//!
//! Each builder draws one part of the report against an explicit canvas and
//! cursor. None of them draw footers; those are stamped afterwards by
//! [`crate::finalize`] once the page count is known.

pub mod file_block;
pub mod recommendations;
pub mod summary;
pub mod title;

pub use file_block::{rule_rows, status_cell_style, STATUS_COLUMN};
pub use summary::{stat_tiles, StatTile, SummaryGeometry};
