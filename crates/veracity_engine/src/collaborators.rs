#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use veracity_contracts::{AnswerId, AssessmentId, QuestionOrRequirementId};

/// Read-only question/requirement catalog. An id that exists in neither
/// catalog is fatal to answer writes.
pub trait TargetCatalog {
    fn target_exists(&self, question_or_requirement_id: QuestionOrRequirementId) -> bool;
}

/// Last-modified marker on the assessment record. Fire-and-forget; no result
/// is consumed.
pub trait AssessmentTouch {
    fn touch(&self, assessment_id: AssessmentId);
}

/// Mode-specific traversal of the standards structure. The traversal itself
/// is external and opaque here; only the resulting answer-id set matters.
pub trait ActiveAnswerSource {
    fn question_mode_answer_ids(&self, assessment_id: AssessmentId) -> BTreeSet<AnswerId>;
    fn requirement_mode_answer_ids(&self, assessment_id: AssessmentId) -> BTreeSet<AnswerId>;
}

/// Universal assurance-level lookup by full display name.
pub trait SalCatalog {
    fn universal_code(&self, full_name: &str) -> Option<&str>;
}

/// The standard four-level assurance table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSalCatalog;

impl SalCatalog for StaticSalCatalog {
    fn universal_code(&self, full_name: &str) -> Option<&str> {
        match full_name {
            "Low" => Some("L"),
            "Moderate" => Some("M"),
            "High" => Some("H"),
            "Very High" => Some("VH"),
            _ => None,
        }
    }
}
