/// Outcome of a single evaluated rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Passed,
    Warning,
    Failed,
}

impl RuleStatus {
    /// Uppercase token shown in the status column of a report table
    pub fn token(&self) -> &'static str {
        match self {
            RuleStatus::Passed => "PASSED",
            RuleStatus::Warning => "WARNING",
            RuleStatus::Failed => "FAILED",
        }
    }
}

/// Aggregate status of one analyzed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverallStatus {
    Compliant,
    Warning,
    NonCompliant,
}

impl OverallStatus {
    /// Derive the aggregate status from rule outcomes.
    ///
    /// Any failed rule makes the document non-compliant; otherwise any warning
    /// downgrades it to warning. An empty rule set is compliant.
    pub fn derive<'a, I>(rules: I) -> Self
    where
        I: IntoIterator<Item = &'a ComplianceRule>,
    {
        let mut status = OverallStatus::Compliant;
        for rule in rules {
            match rule.status {
                RuleStatus::Failed => return OverallStatus::NonCompliant,
                RuleStatus::Warning => status = OverallStatus::Warning,
                RuleStatus::Passed => {}
            }
        }
        status
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Compliant => "COMPLIANT",
            OverallStatus::Warning => "WARNING",
            OverallStatus::NonCompliant => "NON-COMPLIANT",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OverallStatus::Compliant => "compliant",
            OverallStatus::Warning => "warning",
            OverallStatus::NonCompliant => "non-compliant",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceRule {
    pub id: String,       // Unique within the parent result
    pub category: String, // e.g., "Class A"
    pub rule: String,
    pub status: RuleStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ComplianceRule {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        rule: impl Into<String>,
        status: RuleStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            rule: rule.into(),
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub file_name: String,
    pub overall_status: OverallStatus,
    pub rules: Vec<ComplianceRule>, // Order is preserved in rendered output
    #[serde(rename = "processingTime", default)]
    pub processing_time_ms: u64,
}

/// Declared `overallStatus` disagrees with the status derived from the rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{file_name}' declares status {declared} but its rules imply {derived}")]
pub struct StatusMismatch {
    pub file_name: String,
    pub declared: OverallStatus,
    pub derived: OverallStatus,
}

impl ComplianceResult {
    /// Build a result whose overall status is derived from its rules
    pub fn from_rules(
        file_name: impl Into<String>,
        rules: Vec<ComplianceRule>,
        processing_time_ms: u64,
    ) -> Self {
        let overall_status = OverallStatus::derive(&rules);
        Self {
            file_name: file_name.into(),
            overall_status,
            rules,
            processing_time_ms,
        }
    }

    /// Check the declared status against the rule outcomes
    pub fn check_status(&self) -> Result<(), StatusMismatch> {
        let derived = OverallStatus::derive(&self.rules);
        if derived == self.overall_status {
            Ok(())
        } else {
            Err(StatusMismatch {
                file_name: self.file_name.clone(),
                declared: self.overall_status,
                derived,
            })
        }
    }
}
