#![forbid(unsafe_code)]

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use sha2::{Digest, Sha256};

use veracity_contracts::answer::{AnswerRow, AnswerSubmission};
use veracity_contracts::document::{DocumentRow, DocumentUpload};
use veracity_contracts::standards::{ApplicationMode, AvailableStandardRow, StandardSelectionRow};
use veracity_contracts::{
    AnswerId, AssessmentId, ContractViolation, DocumentId, QuestionOrRequirementId, Validate,
};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    ForeignKeyViolation { table: &'static str, key: String },
    DuplicateKey { table: &'static str, key: String },
    ContractViolation(ContractViolation),
}

impl From<ContractViolation> for StorageError {
    fn from(v: ContractViolation) -> Self {
        StorageError::ContractViolation(v)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ForeignKeyViolation { table, key } => {
                write!(f, "foreign key violation on {table}: {key}")
            }
            StorageError::DuplicateKey { table, key } => {
                write!(f, "duplicate key on {table}: {key}")
            }
            StorageError::ContractViolation(v) => write!(f, "contract violation: {v}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Lowercase SHA-256 hex of the raw bytes. Canonical producer for
/// `DocumentUpload::content_hash`.
pub fn content_hash_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// In-memory assessment store. Tables and natural-key indexes mirror the
/// relational layout; row ids are assigned here, never by callers.
#[derive(Debug, Clone)]
pub struct AssessmentStore {
    // One selection row per assessment, materialized on first mode read.
    standard_selection: BTreeMap<AssessmentId, StandardSelectionRow>,
    // Natural key: (assessment_id, set_name).
    available_standards: BTreeMap<(AssessmentId, String), AvailableStandardRow>,

    answers: BTreeMap<AnswerId, AnswerRow>,
    // Natural key: (assessment_id, question_or_requirement_id) -> answer_id.
    answers_by_target: BTreeMap<(AssessmentId, QuestionOrRequirementId), AnswerId>,
    next_answer_id: u64,

    documents: BTreeMap<DocumentId, DocumentRow>,
    // Dedup key: (assessment_id, content_hash) -> document_id.
    documents_by_hash: BTreeMap<(AssessmentId, String), DocumentId>,
    next_document_id: u64,

    // Many-to-many document/answer association, one entry per pair.
    document_answers: BTreeSet<(DocumentId, AnswerId)>,
}

impl AssessmentStore {
    pub fn new_in_memory() -> Self {
        Self {
            standard_selection: BTreeMap::new(),
            available_standards: BTreeMap::new(),
            answers: BTreeMap::new(),
            answers_by_target: BTreeMap::new(),
            next_answer_id: 1,
            documents: BTreeMap::new(),
            documents_by_hash: BTreeMap::new(),
            next_document_id: 1,
            document_answers: BTreeSet::new(),
        }
    }

    // ------------------------
    // Standards selection.
    // ------------------------

    pub fn get_or_create_standard_selection(
        &mut self,
        assessment_id: AssessmentId,
    ) -> Result<&StandardSelectionRow, StorageError> {
        assessment_id.validate()?;
        match self.standard_selection.entry(assessment_id) {
            Entry::Occupied(o) => Ok(o.into_mut()),
            Entry::Vacant(v) => {
                let row = StandardSelectionRow::defaulted_v1(assessment_id)?;
                Ok(v.insert(row))
            }
        }
    }

    pub fn standard_selection_row(
        &self,
        assessment_id: AssessmentId,
    ) -> Option<&StandardSelectionRow> {
        self.standard_selection.get(&assessment_id)
    }

    pub fn set_standard_selection_mode(
        &mut self,
        assessment_id: AssessmentId,
        mode: ApplicationMode,
    ) -> Result<(), StorageError> {
        assessment_id.validate()?;
        match self.standard_selection.entry(assessment_id) {
            Entry::Occupied(mut o) => {
                o.get_mut().application_mode_label = mode.storage_label().to_string();
            }
            Entry::Vacant(v) => {
                let row = StandardSelectionRow::v1(
                    assessment_id,
                    mode.storage_label().to_string(),
                    None,
                )?;
                v.insert(row);
            }
        }
        Ok(())
    }

    /// Raw row upsert for seeding and import paths. Label text is stored as
    /// given; mode resolution happens at read time.
    pub fn upsert_standard_selection(
        &mut self,
        row: StandardSelectionRow,
    ) -> Result<(), StorageError> {
        row.validate()?;
        self.standard_selection.insert(row.assessment_id, row);
        Ok(())
    }

    pub fn set_selected_sal_level(
        &mut self,
        assessment_id: AssessmentId,
        selected_sal_level: Option<String>,
    ) -> Result<(), StorageError> {
        let mode_label = match self.standard_selection.get(&assessment_id) {
            Some(existing) => existing.application_mode_label.clone(),
            None => ApplicationMode::Questions.storage_label().to_string(),
        };
        let row = StandardSelectionRow::v1(assessment_id, mode_label, selected_sal_level)?;
        self.standard_selection.insert(assessment_id, row);
        Ok(())
    }

    pub fn upsert_available_standard(
        &mut self,
        row: AvailableStandardRow,
    ) -> Result<(), StorageError> {
        row.validate()?;
        self.available_standards
            .insert((row.assessment_id, row.set_name.clone()), row);
        Ok(())
    }

    pub fn selected_standard_names(&self, assessment_id: AssessmentId) -> BTreeSet<String> {
        self.available_standards
            .values()
            .filter(|r| r.assessment_id == assessment_id && r.selected)
            .map(|r| r.set_name.clone())
            .collect()
    }

    // ------------------------
    // Answers.
    // ------------------------

    pub fn upsert_answer(
        &mut self,
        submission: &AnswerSubmission,
        is_requirement: bool,
    ) -> Result<AnswerId, StorageError> {
        submission.validate()?;
        let key = (
            submission.assessment_id,
            submission.question_or_requirement_id,
        );

        if let Some(existing_id) = self.answers_by_target.get(&key).copied() {
            let updated =
                AnswerRow::from_submission_v1(existing_id, is_requirement, submission.clone())?;
            self.answers.insert(existing_id, updated);
            return Ok(existing_id);
        }

        let answer_id = AnswerId(self.next_answer_id);
        self.next_answer_id = self.next_answer_id.saturating_add(1);
        let row = AnswerRow::from_submission_v1(answer_id, is_requirement, submission.clone())?;
        self.answers_by_target.insert(key, answer_id);
        self.answers.insert(answer_id, row);
        Ok(answer_id)
    }

    pub fn answer_row(&self, answer_id: AnswerId) -> Option<&AnswerRow> {
        self.answers.get(&answer_id)
    }

    pub fn answer_row_by_target(
        &self,
        assessment_id: AssessmentId,
        question_or_requirement_id: QuestionOrRequirementId,
    ) -> Option<&AnswerRow> {
        let id = self
            .answers_by_target
            .get(&(assessment_id, question_or_requirement_id))?;
        self.answers.get(id)
    }

    pub fn answer_rows_for_assessment(&self, assessment_id: AssessmentId) -> Vec<&AnswerRow> {
        self.answers
            .values()
            .filter(|r| r.assessment_id == assessment_id)
            .collect()
    }

    // ------------------------
    // Documents + links.
    // ------------------------

    pub fn insert_document(&mut self, upload: DocumentUpload) -> Result<DocumentId, StorageError> {
        upload.validate()?;
        let hash_key = (upload.assessment_id, upload.content_hash.clone());
        if self.documents_by_hash.contains_key(&hash_key) {
            return Err(StorageError::DuplicateKey {
                table: "documents.assessment_id_content_hash",
                key: format!("{}:{}", upload.assessment_id.0, upload.content_hash),
            });
        }

        let document_id = DocumentId(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);
        let row = DocumentRow::from_upload_v1(document_id, upload)?;
        self.documents_by_hash.insert(hash_key, document_id);
        self.documents.insert(document_id, row);
        Ok(document_id)
    }

    pub fn document_row(&self, document_id: DocumentId) -> Option<&DocumentRow> {
        self.documents.get(&document_id)
    }

    pub fn document_by_hash(
        &self,
        assessment_id: AssessmentId,
        content_hash: &str,
    ) -> Option<DocumentId> {
        self.documents_by_hash
            .get(&(assessment_id, content_hash.to_string()))
            .copied()
    }

    /// Dedup-hit path: last write wins on title + file name; bytes and
    /// content type stay fixed under the (assessment_id, content_hash) key.
    pub fn update_document_metadata(
        &mut self,
        document_id: DocumentId,
        title: &str,
        file_name: &str,
    ) -> Result<(), StorageError> {
        let updated = match self.documents.get(&document_id) {
            Some(row) => {
                let mut u = row.clone();
                u.title = title.to_string();
                u.file_name = file_name.to_string();
                u.validate()?;
                u
            }
            None => {
                return Err(StorageError::ForeignKeyViolation {
                    table: "documents.document_id",
                    key: document_id.0.to_string(),
                })
            }
        };
        self.documents.insert(document_id, updated);
        Ok(())
    }

    pub fn rename_document_title(
        &mut self,
        document_id: DocumentId,
        new_title: &str,
    ) -> Result<(), StorageError> {
        let updated = match self.documents.get(&document_id) {
            Some(row) => {
                let mut u = row.clone();
                u.title = new_title.to_string();
                u.validate()?;
                u
            }
            None => {
                return Err(StorageError::ForeignKeyViolation {
                    table: "documents.document_id",
                    key: document_id.0.to_string(),
                })
            }
        };
        self.documents.insert(document_id, updated);
        Ok(())
    }

    /// Idempotent: returns `true` only when the pair was newly linked. Both
    /// sides must exist and belong to the same assessment.
    pub fn link_document_answer(
        &mut self,
        document_id: DocumentId,
        answer_id: AnswerId,
    ) -> Result<bool, StorageError> {
        let doc = match self.documents.get(&document_id) {
            Some(d) => d,
            None => {
                return Err(StorageError::ForeignKeyViolation {
                    table: "document_answers.document_id",
                    key: document_id.0.to_string(),
                })
            }
        };
        let ans = match self.answers.get(&answer_id) {
            Some(a) => a,
            None => {
                return Err(StorageError::ForeignKeyViolation {
                    table: "document_answers.answer_id",
                    key: answer_id.0.to_string(),
                })
            }
        };
        if doc.assessment_id != ans.assessment_id {
            return Err(StorageError::ForeignKeyViolation {
                table: "document_answers.assessment_scope",
                key: format!("document {} answer {}", document_id.0, answer_id.0),
            });
        }
        Ok(self.document_answers.insert((document_id, answer_id)))
    }

    /// Returns `true` when the pair existed and was removed.
    pub fn unlink_document_answer(&mut self, document_id: DocumentId, answer_id: AnswerId) -> bool {
        self.document_answers.remove(&(document_id, answer_id))
    }

    pub fn links_for_document(&self, document_id: DocumentId) -> Vec<AnswerId> {
        self.document_answers
            .iter()
            .filter(|(d, _)| *d == document_id)
            .map(|(_, a)| *a)
            .collect()
    }

    pub fn links_for_answer(&self, answer_id: AnswerId) -> Vec<DocumentId> {
        self.document_answers
            .iter()
            .filter(|(_, a)| *a == answer_id)
            .map(|(d, _)| *d)
            .collect()
    }

    /// Removes the row, its hash-index entry, and any remaining link entries.
    pub fn remove_document(&mut self, document_id: DocumentId) -> Result<(), StorageError> {
        match self.documents.remove(&document_id) {
            Some(row) => {
                let hash_key = (row.assessment_id, row.content_hash);
                self.documents_by_hash.remove(&hash_key);
                self.document_answers.retain(|(d, _)| *d != document_id);
                Ok(())
            }
            None => Err(StorageError::ForeignKeyViolation {
                table: "documents.document_id",
                key: document_id.0.to_string(),
            }),
        }
    }

    pub fn document_rows_for_assessment(&self, assessment_id: AssessmentId) -> Vec<&DocumentRow> {
        self.documents
            .values()
            .filter(|r| r.assessment_id == assessment_id)
            .collect()
    }
}
