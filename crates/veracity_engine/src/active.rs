#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use veracity_contracts::standards::ApplicationMode;
use veracity_contracts::{AnswerId, AssessmentId};
use veracity_storage::repo::StandardsRepo;
use veracity_storage::StorageError;

use crate::collaborators::ActiveAnswerSource;
use crate::standards;

/// Answer ids in scope for the assessment's current mode. Resolves the mode
/// first (materializing the default selection row when absent), then runs the
/// matching traversal. Consumed as a visibility filter, never mutated.
pub fn active_answer_ids<R, S>(
    repo: &mut R,
    source: &S,
    assessment_id: AssessmentId,
) -> Result<BTreeSet<AnswerId>, StorageError>
where
    R: StandardsRepo,
    S: ActiveAnswerSource,
{
    let ids = match standards::application_mode(repo, assessment_id)? {
        ApplicationMode::Questions => source.question_mode_answer_ids(assessment_id),
        ApplicationMode::Requirements => source.requirement_mode_answer_ids(assessment_id),
    };
    Ok(ids)
}
