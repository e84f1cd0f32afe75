pub mod types;

pub use types::{ComplianceResult, ComplianceRule, OverallStatus, RuleStatus, StatusMismatch};
