#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use veracity_contracts::answer::{AnswerRow, AnswerSubmission};
use veracity_contracts::document::{DocumentRow, DocumentUpload};
use veracity_contracts::standards::{ApplicationMode, AvailableStandardRow, StandardSelectionRow};
use veracity_contracts::{AnswerId, AssessmentId, DocumentId, QuestionOrRequirementId};

use crate::store::{AssessmentStore, StorageError};

/// Typed repository interface for per-assessment standards selection.
pub trait StandardsRepo {
    fn get_or_create_standard_selection(
        &mut self,
        assessment_id: AssessmentId,
    ) -> Result<&StandardSelectionRow, StorageError>;
    fn standard_selection_row(&self, assessment_id: AssessmentId)
        -> Option<&StandardSelectionRow>;
    fn set_standard_selection_mode(
        &mut self,
        assessment_id: AssessmentId,
        mode: ApplicationMode,
    ) -> Result<(), StorageError>;
    fn upsert_standard_selection(&mut self, row: StandardSelectionRow)
        -> Result<(), StorageError>;
    fn set_selected_sal_level(
        &mut self,
        assessment_id: AssessmentId,
        selected_sal_level: Option<String>,
    ) -> Result<(), StorageError>;
    fn upsert_available_standard(&mut self, row: AvailableStandardRow)
        -> Result<(), StorageError>;
    fn selected_standard_names(&self, assessment_id: AssessmentId) -> BTreeSet<String>;
}

/// Typed repository interface for idempotent answer persistence.
pub trait AnswersRepo {
    fn upsert_answer(
        &mut self,
        submission: &AnswerSubmission,
        is_requirement: bool,
    ) -> Result<AnswerId, StorageError>;
    fn answer_row(&self, answer_id: AnswerId) -> Option<&AnswerRow>;
    fn answer_row_by_target(
        &self,
        assessment_id: AssessmentId,
        question_or_requirement_id: QuestionOrRequirementId,
    ) -> Option<&AnswerRow>;
    fn answer_rows_for_assessment(&self, assessment_id: AssessmentId) -> Vec<&AnswerRow>;
}

/// Typed repository interface for document rows + document-answer links.
pub trait DocumentsRepo {
    fn insert_document(&mut self, upload: DocumentUpload) -> Result<DocumentId, StorageError>;
    fn document_row(&self, document_id: DocumentId) -> Option<&DocumentRow>;
    fn document_by_hash(
        &self,
        assessment_id: AssessmentId,
        content_hash: &str,
    ) -> Option<DocumentId>;
    fn update_document_metadata(
        &mut self,
        document_id: DocumentId,
        title: &str,
        file_name: &str,
    ) -> Result<(), StorageError>;
    fn rename_document_title(
        &mut self,
        document_id: DocumentId,
        new_title: &str,
    ) -> Result<(), StorageError>;
    fn link_document_answer(
        &mut self,
        document_id: DocumentId,
        answer_id: AnswerId,
    ) -> Result<bool, StorageError>;
    fn unlink_document_answer(&mut self, document_id: DocumentId, answer_id: AnswerId) -> bool;
    fn links_for_document(&self, document_id: DocumentId) -> Vec<AnswerId>;
    fn links_for_answer(&self, answer_id: AnswerId) -> Vec<DocumentId>;
    fn remove_document(&mut self, document_id: DocumentId) -> Result<(), StorageError>;
    fn document_rows_for_assessment(&self, assessment_id: AssessmentId) -> Vec<&DocumentRow>;
}

impl StandardsRepo for AssessmentStore {
    fn get_or_create_standard_selection(
        &mut self,
        assessment_id: AssessmentId,
    ) -> Result<&StandardSelectionRow, StorageError> {
        self.get_or_create_standard_selection(assessment_id)
    }

    fn standard_selection_row(
        &self,
        assessment_id: AssessmentId,
    ) -> Option<&StandardSelectionRow> {
        self.standard_selection_row(assessment_id)
    }

    fn set_standard_selection_mode(
        &mut self,
        assessment_id: AssessmentId,
        mode: ApplicationMode,
    ) -> Result<(), StorageError> {
        self.set_standard_selection_mode(assessment_id, mode)
    }

    fn upsert_standard_selection(
        &mut self,
        row: StandardSelectionRow,
    ) -> Result<(), StorageError> {
        self.upsert_standard_selection(row)
    }

    fn set_selected_sal_level(
        &mut self,
        assessment_id: AssessmentId,
        selected_sal_level: Option<String>,
    ) -> Result<(), StorageError> {
        self.set_selected_sal_level(assessment_id, selected_sal_level)
    }

    fn upsert_available_standard(
        &mut self,
        row: AvailableStandardRow,
    ) -> Result<(), StorageError> {
        self.upsert_available_standard(row)
    }

    fn selected_standard_names(&self, assessment_id: AssessmentId) -> BTreeSet<String> {
        self.selected_standard_names(assessment_id)
    }
}

impl AnswersRepo for AssessmentStore {
    fn upsert_answer(
        &mut self,
        submission: &AnswerSubmission,
        is_requirement: bool,
    ) -> Result<AnswerId, StorageError> {
        self.upsert_answer(submission, is_requirement)
    }

    fn answer_row(&self, answer_id: AnswerId) -> Option<&AnswerRow> {
        self.answer_row(answer_id)
    }

    fn answer_row_by_target(
        &self,
        assessment_id: AssessmentId,
        question_or_requirement_id: QuestionOrRequirementId,
    ) -> Option<&AnswerRow> {
        self.answer_row_by_target(assessment_id, question_or_requirement_id)
    }

    fn answer_rows_for_assessment(&self, assessment_id: AssessmentId) -> Vec<&AnswerRow> {
        self.answer_rows_for_assessment(assessment_id)
    }
}

impl DocumentsRepo for AssessmentStore {
    fn insert_document(&mut self, upload: DocumentUpload) -> Result<DocumentId, StorageError> {
        self.insert_document(upload)
    }

    fn document_row(&self, document_id: DocumentId) -> Option<&DocumentRow> {
        self.document_row(document_id)
    }

    fn document_by_hash(
        &self,
        assessment_id: AssessmentId,
        content_hash: &str,
    ) -> Option<DocumentId> {
        self.document_by_hash(assessment_id, content_hash)
    }

    fn update_document_metadata(
        &mut self,
        document_id: DocumentId,
        title: &str,
        file_name: &str,
    ) -> Result<(), StorageError> {
        self.update_document_metadata(document_id, title, file_name)
    }

    fn rename_document_title(
        &mut self,
        document_id: DocumentId,
        new_title: &str,
    ) -> Result<(), StorageError> {
        self.rename_document_title(document_id, new_title)
    }

    fn link_document_answer(
        &mut self,
        document_id: DocumentId,
        answer_id: AnswerId,
    ) -> Result<bool, StorageError> {
        self.link_document_answer(document_id, answer_id)
    }

    fn unlink_document_answer(&mut self, document_id: DocumentId, answer_id: AnswerId) -> bool {
        self.unlink_document_answer(document_id, answer_id)
    }

    fn links_for_document(&self, document_id: DocumentId) -> Vec<AnswerId> {
        self.links_for_document(document_id)
    }

    fn links_for_answer(&self, answer_id: AnswerId) -> Vec<DocumentId> {
        self.links_for_answer(answer_id)
    }

    fn remove_document(&mut self, document_id: DocumentId) -> Result<(), StorageError> {
        self.remove_document(document_id)
    }

    fn document_rows_for_assessment(&self, assessment_id: AssessmentId) -> Vec<&DocumentRow> {
        self.document_rows_for_assessment(assessment_id)
    }
}
