#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{
    AnswerId, AssessmentId, ContractViolation, QuestionOrRequirementId, SchemaVersion, Validate,
};

pub const ANSWER_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// Sentinel persisted when a submission carries no usable answer text.
pub const UNANSWERED_TEXT: &str = "U";

fn validate_opt_len(
    field: &'static str,
    value: &Option<String>,
    max_len: usize,
) -> Result<(), ContractViolation> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(ContractViolation::InvalidValue {
                field,
                reason: "exceeds max length",
            });
        }
    }
    Ok(())
}

/// One answer submission against a question or requirement target. The same
/// submission keys re-sent later must update the existing row, never insert a
/// second one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub schema_version: SchemaVersion,
    pub assessment_id: AssessmentId,
    pub question_or_requirement_id: QuestionOrRequirementId,
    pub question_number: u32,
    pub answer_text: Option<String>,
    pub alternate_justification: Option<String>,
    pub comment: Option<String>,
    pub mark_for_review: bool,
}

impl AnswerSubmission {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        assessment_id: AssessmentId,
        question_or_requirement_id: QuestionOrRequirementId,
        question_number: u32,
        answer_text: Option<String>,
        alternate_justification: Option<String>,
        comment: Option<String>,
        mark_for_review: bool,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: ANSWER_CONTRACT_VERSION,
            assessment_id,
            question_or_requirement_id,
            question_number,
            answer_text,
            alternate_justification,
            comment,
            mark_for_review,
        };
        r.validate()?;
        Ok(r)
    }

    /// Text actually persisted: missing, empty, or whitespace-only input maps
    /// to [`UNANSWERED_TEXT`].
    pub fn normalized_answer_text(&self) -> String {
        match &self.answer_text {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => UNANSWERED_TEXT.to_string(),
        }
    }
}

impl Validate for AnswerSubmission {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != ANSWER_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "answer_submission.schema_version",
                reason: "must match ANSWER_CONTRACT_VERSION",
            });
        }
        self.assessment_id.validate()?;
        self.question_or_requirement_id.validate()?;
        validate_opt_len("answer_submission.answer_text", &self.answer_text, 256)?;
        validate_opt_len(
            "answer_submission.alternate_justification",
            &self.alternate_justification,
            4096,
        )?;
        validate_opt_len("answer_submission.comment", &self.comment, 4096)?;
        Ok(())
    }
}

/// Persisted answer. At most one row per
/// (assessment_id, question_or_requirement_id); `answer_text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRow {
    pub schema_version: SchemaVersion,
    pub answer_id: AnswerId,
    pub assessment_id: AssessmentId,
    pub question_or_requirement_id: QuestionOrRequirementId,
    pub question_number: u32,
    pub is_requirement: bool,
    pub answer_text: String,
    pub alternate_justification: Option<String>,
    pub comment: Option<String>,
    pub mark_for_review: bool,
}

impl AnswerRow {
    pub fn from_submission_v1(
        answer_id: AnswerId,
        is_requirement: bool,
        submission: AnswerSubmission,
    ) -> Result<Self, ContractViolation> {
        submission.validate()?;
        let answer_text = submission.normalized_answer_text();
        let r = Self {
            schema_version: ANSWER_CONTRACT_VERSION,
            answer_id,
            assessment_id: submission.assessment_id,
            question_or_requirement_id: submission.question_or_requirement_id,
            question_number: submission.question_number,
            is_requirement,
            answer_text,
            alternate_justification: submission.alternate_justification,
            comment: submission.comment,
            mark_for_review: submission.mark_for_review,
        };
        r.validate()?;
        Ok(r)
    }
}

impl Validate for AnswerRow {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != ANSWER_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "answer_row.schema_version",
                reason: "must match ANSWER_CONTRACT_VERSION",
            });
        }
        self.answer_id.validate()?;
        self.assessment_id.validate()?;
        self.question_or_requirement_id.validate()?;
        if self.answer_text.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "answer_row.answer_text",
                reason: "must not be empty",
            });
        }
        if self.answer_text.len() > 256 {
            return Err(ContractViolation::InvalidValue {
                field: "answer_row.answer_text",
                reason: "exceeds max length",
            });
        }
        validate_opt_len(
            "answer_row.alternate_justification",
            &self.alternate_justification,
            4096,
        )?;
        validate_opt_len("answer_row.comment", &self.comment, 4096)?;
        Ok(())
    }
}
