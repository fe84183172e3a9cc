#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use log::debug;

use veracity_contracts::standards::ApplicationMode;
use veracity_contracts::AssessmentId;
use veracity_storage::repo::StandardsRepo;
use veracity_storage::StorageError;

use crate::collaborators::{AssessmentTouch, SalCatalog};

/// Operating mode for the assessment, materializing the default selection row
/// on first read. Reads never touch the assessment, a lazily created row
/// included.
pub fn application_mode<R>(
    repo: &mut R,
    assessment_id: AssessmentId,
) -> Result<ApplicationMode, StorageError>
where
    R: StandardsRepo,
{
    let row = repo.get_or_create_standard_selection(assessment_id)?;
    Ok(row.resolved_mode())
}

/// Writes the canonical label for `mode`, inserting the selection row when
/// absent, then touches the assessment.
pub fn set_application_mode<R, T>(
    repo: &mut R,
    touch: &T,
    assessment_id: AssessmentId,
    mode: ApplicationMode,
) -> Result<(), StorageError>
where
    R: StandardsRepo,
    T: AssessmentTouch,
{
    repo.set_standard_selection_mode(assessment_id, mode)?;
    debug!(
        "assessment {} application mode set to {}",
        assessment_id.0,
        mode.storage_label()
    );
    touch.touch(assessment_id);
    Ok(())
}

/// Universal assurance-level code for the assessment's selected level. Absent
/// row, absent level, and unknown names all resolve to `None`.
pub fn assurance_level<R, S>(
    repo: &R,
    sal_catalog: &S,
    assessment_id: AssessmentId,
) -> Option<String>
where
    R: StandardsRepo,
    S: SalCatalog,
{
    repo.standard_selection_row(assessment_id)
        .and_then(|row| row.selected_sal_level.as_deref())
        .and_then(|name| sal_catalog.universal_code(name))
        .map(ToString::to_string)
}

/// Names of the standard sets currently selected for the assessment.
pub fn selected_standard_names<R>(repo: &R, assessment_id: AssessmentId) -> BTreeSet<String>
where
    R: StandardsRepo,
{
    repo.selected_standard_names(assessment_id)
}
