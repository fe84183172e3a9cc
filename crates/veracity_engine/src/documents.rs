#![forbid(unsafe_code)]

use log::{debug, info};

use veracity_contracts::document::{DocumentSummary, DocumentUpload};
use veracity_contracts::{AnswerId, AssessmentId, ContractViolation, DocumentId};
use veracity_contracts::{QuestionOrRequirementId, Validate};
use veracity_storage::repo::{AnswersRepo, DocumentsRepo, StandardsRepo};
use veracity_storage::StorageError;

use crate::active::active_answer_ids;
use crate::collaborators::{ActiveAnswerSource, AssessmentTouch};
use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRuntimeConfig {
    pub max_document_bytes: usize,
}

impl DocumentRuntimeConfig {
    pub fn mvp_v1() -> Self {
        Self {
            max_document_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Document write/read path. Holds config and the touch collaborator; the
/// store is passed per call.
#[derive(Debug, Clone)]
pub struct DocumentRuntime<T>
where
    T: AssessmentTouch,
{
    config: DocumentRuntimeConfig,
    touch: T,
}

impl<T> DocumentRuntime<T>
where
    T: AssessmentTouch,
{
    pub fn new(config: DocumentRuntimeConfig, touch: T) -> Self {
        Self { config, touch }
    }

    /// Summaries of every document linked to the answer, raw titles. Unknown
    /// or unlinked answers yield an empty list.
    pub fn documents_for_answer<R>(&self, repo: &R, answer_id: AnswerId) -> Vec<DocumentSummary>
    where
        R: DocumentsRepo,
    {
        repo.links_for_answer(answer_id)
            .into_iter()
            .filter_map(|document_id| repo.document_row(document_id))
            .map(DocumentSummary::from_row)
            .collect()
    }

    /// Stores one evidence upload against an answer. Identical bytes within
    /// the assessment reuse the existing row (title and file name take the
    /// latest write; bytes and content type stay as first stored) and the
    /// (document, answer) link is created at most once. Returns the document
    /// id, new or reused.
    pub fn add_document<R>(
        &self,
        repo: &mut R,
        upload: DocumentUpload,
    ) -> Result<DocumentId, EngineError>
    where
        R: DocumentsRepo + AnswersRepo,
    {
        upload.validate()?;
        if upload.bytes.len() > self.config.max_document_bytes {
            return Err(ContractViolation::TooLarge {
                field: "document_upload.bytes",
                max: self.config.max_document_bytes,
                got: upload.bytes.len(),
            }
            .into());
        }

        let assessment_id = upload.assessment_id;
        let answer_id = upload.answer_id;

        // The link target must exist in this assessment before anything is
        // written, so a failure cannot leave an unlinked document behind.
        match repo.answer_row(answer_id) {
            Some(row) if row.assessment_id == assessment_id => {}
            Some(_) => {
                return Err(StorageError::ForeignKeyViolation {
                    table: "document_answers.assessment_scope",
                    key: answer_id.0.to_string(),
                }
                .into())
            }
            None => {
                return Err(StorageError::ForeignKeyViolation {
                    table: "document_answers.answer_id",
                    key: answer_id.0.to_string(),
                }
                .into())
            }
        }

        let title = upload.normalized_title();
        let document_id = match repo.document_by_hash(assessment_id, &upload.content_hash) {
            Some(existing) => {
                repo.update_document_metadata(existing, &title, &upload.file_name)?;
                debug!(
                    "assessment {} upload deduplicated onto document {}",
                    assessment_id.0, existing.0
                );
                existing
            }
            None => repo.insert_document(upload)?,
        };

        repo.link_document_answer(document_id, answer_id)?;
        self.touch.touch(assessment_id);
        Ok(document_id)
    }

    /// Sets the stored title verbatim and touches the owning assessment.
    /// Unknown ids are a successful no-op without a touch.
    pub fn rename_document<R>(
        &self,
        repo: &mut R,
        document_id: DocumentId,
        new_title: &str,
    ) -> Result<(), StorageError>
    where
        R: DocumentsRepo,
    {
        let assessment_id = match repo.document_row(document_id) {
            Some(row) => row.assessment_id,
            None => return Ok(()),
        };
        repo.rename_document_title(document_id, new_title)?;
        self.touch.touch(assessment_id);
        Ok(())
    }

    /// Detaches the answer from the document, then deletes the document if no
    /// answer of its assessment still references it. The cascade runs here,
    /// synchronously, as an explicit post-condition of the unlink. Unknown
    /// documents are a successful no-op without a touch.
    pub fn delete_document<R>(
        &self,
        repo: &mut R,
        document_id: DocumentId,
        answer_id: AnswerId,
    ) -> Result<(), StorageError>
    where
        R: DocumentsRepo + AnswersRepo,
    {
        let assessment_id = match repo.document_row(document_id) {
            Some(row) => row.assessment_id,
            None => return Ok(()),
        };
        repo.unlink_document_answer(document_id, answer_id);

        let still_referenced = repo
            .links_for_document(document_id)
            .into_iter()
            .filter_map(|linked| repo.answer_row(linked))
            .any(|row| row.assessment_id == assessment_id);
        if !still_referenced {
            repo.remove_document(document_id)?;
            info!(
                "assessment {} document {} orphaned and removed",
                assessment_id.0, document_id.0
            );
        }
        self.touch.touch(assessment_id);
        Ok(())
    }

    /// Question/requirement ids behind every answer linked to the document.
    /// Unknown documents yield an empty list.
    pub fn questions_for_document<R>(
        &self,
        repo: &R,
        document_id: DocumentId,
    ) -> Vec<QuestionOrRequirementId>
    where
        R: DocumentsRepo + AnswersRepo,
    {
        repo.links_for_document(document_id)
            .into_iter()
            .filter_map(|answer_id| repo.answer_row(answer_id))
            .map(|row| row.question_or_requirement_id)
            .collect()
    }

    /// Evidence visible for the assessment in its current mode: documents
    /// with at least one link into the active answer set. Placeholder titles
    /// render as the untitled display value in the summaries only.
    pub fn documents_for_assessment<R, S>(
        &self,
        repo: &mut R,
        source: &S,
        assessment_id: AssessmentId,
    ) -> Result<Vec<DocumentSummary>, StorageError>
    where
        R: DocumentsRepo + StandardsRepo,
        S: ActiveAnswerSource,
    {
        let active = active_answer_ids(repo, source, assessment_id)?;
        let mut out = Vec::new();
        for row in repo.document_rows_for_assessment(assessment_id) {
            let linked = repo
                .links_for_document(row.document_id)
                .into_iter()
                .any(|answer_id| active.contains(&answer_id));
            if linked {
                out.push(DocumentSummary {
                    document_id: row.document_id,
                    title: row.display_title().to_string(),
                    file_name: row.file_name.clone(),
                });
            }
        }
        Ok(out)
    }
}
