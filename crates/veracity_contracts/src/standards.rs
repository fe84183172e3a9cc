#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{AssessmentId, ContractViolation, SchemaVersion, Validate};

pub const STANDARDS_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

fn validate_id(field: &'static str, value: &str, max_len: usize) -> Result<(), ContractViolation> {
    if value.trim().is_empty() {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must not be empty",
        });
    }
    if value.len() > max_len {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "exceeds max length",
        });
    }
    Ok(())
}

fn validate_opt_id(
    field: &'static str,
    value: &Option<String>,
    max_len: usize,
) -> Result<(), ContractViolation> {
    if let Some(v) = value {
        validate_id(field, v, max_len)?;
    }
    Ok(())
}

/// Assessment operating mode. Stored as a free-text label so legacy values
/// survive round trips; the enum is derived, never persisted directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationMode {
    Questions,
    Requirements,
}

impl ApplicationMode {
    /// Canonical label written to storage for this mode.
    pub fn storage_label(self) -> &'static str {
        match self {
            ApplicationMode::Questions => "Questions Based",
            ApplicationMode::Requirements => "Requirements Based",
        }
    }

    /// Case-insensitive prefix resolution of a stored label. Unrecognized
    /// labels (including the empty string) return `None`; the caller decides
    /// the fallback.
    pub fn from_label(label: &str) -> Option<ApplicationMode> {
        let lower = label.trim().to_ascii_lowercase();
        if lower.starts_with("questions") {
            Some(ApplicationMode::Questions)
        } else if lower.starts_with("requirements") {
            Some(ApplicationMode::Requirements)
        } else {
            None
        }
    }
}

/// Per-assessment standards selection. Exactly one row per assessment; the
/// row is materialized with the Questions label on first mode read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSelectionRow {
    pub schema_version: SchemaVersion,
    pub assessment_id: AssessmentId,
    pub application_mode_label: String,
    pub selected_sal_level: Option<String>,
}

impl StandardSelectionRow {
    pub fn v1(
        assessment_id: AssessmentId,
        application_mode_label: String,
        selected_sal_level: Option<String>,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: STANDARDS_CONTRACT_VERSION,
            assessment_id,
            application_mode_label,
            selected_sal_level,
        };
        r.validate()?;
        Ok(r)
    }

    /// Default row for the lazy get-or-create path.
    pub fn defaulted_v1(assessment_id: AssessmentId) -> Result<Self, ContractViolation> {
        Self::v1(
            assessment_id,
            ApplicationMode::Questions.storage_label().to_string(),
            None,
        )
    }

    /// Mode the stored label resolves to. Unrecognized labels resolve as
    /// Questions; only an explicit requirements label flips the mode.
    pub fn resolved_mode(&self) -> ApplicationMode {
        ApplicationMode::from_label(&self.application_mode_label)
            .unwrap_or(ApplicationMode::Questions)
    }
}

impl Validate for StandardSelectionRow {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != STANDARDS_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "standard_selection_row.schema_version",
                reason: "must match STANDARDS_CONTRACT_VERSION",
            });
        }
        self.assessment_id.validate()?;
        // Legacy labels may be arbitrary text, the empty string included.
        if self.application_mode_label.len() > 64 {
            return Err(ContractViolation::InvalidValue {
                field: "standard_selection_row.application_mode_label",
                reason: "exceeds max length",
            });
        }
        validate_opt_id(
            "standard_selection_row.selected_sal_level",
            &self.selected_sal_level,
            64,
        )?;
        Ok(())
    }
}

/// One selectable standard set per assessment, natural key
/// (assessment_id, set_name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableStandardRow {
    pub schema_version: SchemaVersion,
    pub assessment_id: AssessmentId,
    pub set_name: String,
    pub selected: bool,
}

impl AvailableStandardRow {
    pub fn v1(
        assessment_id: AssessmentId,
        set_name: String,
        selected: bool,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: STANDARDS_CONTRACT_VERSION,
            assessment_id,
            set_name,
            selected,
        };
        r.validate()?;
        Ok(r)
    }
}

impl Validate for AvailableStandardRow {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != STANDARDS_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "available_standard_row.schema_version",
                reason: "must match STANDARDS_CONTRACT_VERSION",
            });
        }
        self.assessment_id.validate()?;
        validate_id("available_standard_row.set_name", &self.set_name, 128)?;
        Ok(())
    }
}
