#![forbid(unsafe_code)]

pub mod answer;
pub mod common;
pub mod document;
pub mod standards;

pub use common::{
    AnswerId, AssessmentId, ContractViolation, DocumentId, QuestionOrRequirementId, SchemaVersion,
    Validate,
};
