#![forbid(unsafe_code)]

use log::debug;

use veracity_contracts::answer::AnswerSubmission;
use veracity_contracts::standards::ApplicationMode;
use veracity_contracts::{AnswerId, Validate};
use veracity_storage::repo::{AnswersRepo, StandardsRepo};

use crate::collaborators::{AssessmentTouch, TargetCatalog};
use crate::{standards, EngineError};

/// Answer write path. Holds the catalog and touch collaborators; the store is
/// passed per call.
#[derive(Debug, Clone)]
pub struct AnswerRuntime<C, T>
where
    C: TargetCatalog,
    T: AssessmentTouch,
{
    catalog: C,
    touch: T,
}

impl<C, T> AnswerRuntime<C, T>
where
    C: TargetCatalog,
    T: AssessmentTouch,
{
    pub fn new(catalog: C, touch: T) -> Self {
        Self { catalog, touch }
    }

    /// Validated, idempotent answer write. The requirement flag is derived
    /// from the assessment's resolved mode; blank text persists as the
    /// unanswered sentinel. Re-sending the same keys updates the existing row
    /// and returns its id.
    ///
    /// An id that is neither a question nor a requirement fails before any
    /// write, the lazy selection-row materialization included.
    pub fn store_answer<R>(
        &self,
        repo: &mut R,
        submission: &AnswerSubmission,
    ) -> Result<AnswerId, EngineError>
    where
        R: AnswersRepo + StandardsRepo,
    {
        submission.validate()?;
        if !self.catalog.target_exists(submission.question_or_requirement_id) {
            return Err(EngineError::UnknownTarget {
                question_or_requirement_id: submission.question_or_requirement_id,
            });
        }

        let mode = standards::application_mode(repo, submission.assessment_id)?;
        let is_requirement = mode == ApplicationMode::Requirements;
        let answer_id = repo.upsert_answer(submission, is_requirement)?;
        debug!(
            "assessment {} answer {} stored for target {}",
            submission.assessment_id.0, answer_id.0, submission.question_or_requirement_id.0
        );
        self.touch.touch(submission.assessment_id);
        Ok(answer_id)
    }
}
