#![forbid(unsafe_code)]

pub mod active;
pub mod answers;
pub mod collaborators;
pub mod documents;
pub mod standards;

use std::fmt;

use veracity_contracts::{ContractViolation, QuestionOrRequirementId};
use veracity_storage::StorageError;

/// Operation-level failure. `UnknownTarget` is fatal and guarantees nothing
/// was written; storage failures pass through unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    UnknownTarget {
        question_or_requirement_id: QuestionOrRequirementId,
    },
    Storage(StorageError),
}

impl From<StorageError> for EngineError {
    fn from(e: StorageError) -> Self {
        EngineError::Storage(e)
    }
}

impl From<ContractViolation> for EngineError {
    fn from(v: ContractViolation) -> Self {
        EngineError::Storage(StorageError::ContractViolation(v))
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownTarget {
                question_or_requirement_id,
            } => write!(
                f,
                "unknown question or requirement: {}",
                question_or_requirement_id.0
            ),
            EngineError::Storage(e) => write!(f, "storage failure: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
