#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{AnswerId, AssessmentId, ContractViolation, DocumentId, SchemaVersion, Validate};

pub const DOCUMENT_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// Sentinel stored when an upload arrives without a usable title.
pub const TITLE_PLACEHOLDER: &str = "click to edit title";

/// Display-only rendering of the placeholder in assessment-level summaries.
/// Never written to storage.
pub const UNTITLED_DISPLAY_TITLE: &str = "(untitled)";

fn validate_id(field: &'static str, value: &str, max_len: usize) -> Result<(), ContractViolation> {
    if value.trim().is_empty() {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must not be empty",
        });
    }
    if value.len() > max_len {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "exceeds max length",
        });
    }
    Ok(())
}

fn validate_hash_hex(field: &'static str, value: &str) -> Result<(), ContractViolation> {
    if value.len() != 64 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must be a 64-char hex value",
        });
    }
    Ok(())
}

/// One evidence upload against an answer. Identical bytes re-uploaded within
/// the same assessment must reuse the existing document row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub schema_version: SchemaVersion,
    pub assessment_id: AssessmentId,
    pub answer_id: AnswerId,
    pub title: String,
    pub file_name: String,
    pub content_type: String,
    pub content_hash: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        assessment_id: AssessmentId,
        answer_id: AnswerId,
        title: String,
        file_name: String,
        content_type: String,
        content_hash: String,
        bytes: Vec<u8>,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: DOCUMENT_CONTRACT_VERSION,
            assessment_id,
            answer_id,
            title,
            file_name,
            content_type,
            content_hash,
            bytes,
        };
        r.validate()?;
        Ok(r)
    }

    /// Title actually persisted: blank input maps to [`TITLE_PLACEHOLDER`],
    /// anything else is kept verbatim.
    pub fn normalized_title(&self) -> String {
        if self.title.trim().is_empty() {
            TITLE_PLACEHOLDER.to_string()
        } else {
            self.title.clone()
        }
    }
}

impl Validate for DocumentUpload {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != DOCUMENT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "document_upload.schema_version",
                reason: "must match DOCUMENT_CONTRACT_VERSION",
            });
        }
        self.assessment_id.validate()?;
        self.answer_id.validate()?;
        // Blank titles are legal input, normalized at persistence.
        if self.title.len() > 256 {
            return Err(ContractViolation::InvalidValue {
                field: "document_upload.title",
                reason: "exceeds max length",
            });
        }
        validate_id("document_upload.file_name", &self.file_name, 256)?;
        validate_id("document_upload.content_type", &self.content_type, 128)?;
        validate_hash_hex("document_upload.content_hash", &self.content_hash)?;
        Ok(())
    }
}

/// Persisted document. Unique by (assessment_id, content_hash); bytes and
/// content type are fixed at first upload for that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub schema_version: SchemaVersion,
    pub document_id: DocumentId,
    pub assessment_id: AssessmentId,
    pub title: String,
    pub file_name: String,
    pub content_type: String,
    pub content_hash: String,
    pub bytes: Vec<u8>,
}

impl DocumentRow {
    pub fn from_upload_v1(
        document_id: DocumentId,
        upload: DocumentUpload,
    ) -> Result<Self, ContractViolation> {
        upload.validate()?;
        let title = upload.normalized_title();
        let r = Self {
            schema_version: DOCUMENT_CONTRACT_VERSION,
            document_id,
            assessment_id: upload.assessment_id,
            title,
            file_name: upload.file_name,
            content_type: upload.content_type,
            content_hash: upload.content_hash,
            bytes: upload.bytes,
        };
        r.validate()?;
        Ok(r)
    }

    /// Title for assessment-level summary reads. The stored value is never
    /// rewritten; only the placeholder renders differently.
    pub fn display_title(&self) -> &str {
        if self.title == TITLE_PLACEHOLDER {
            UNTITLED_DISPLAY_TITLE
        } else {
            &self.title
        }
    }
}

impl Validate for DocumentRow {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != DOCUMENT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "document_row.schema_version",
                reason: "must match DOCUMENT_CONTRACT_VERSION",
            });
        }
        self.document_id.validate()?;
        self.assessment_id.validate()?;
        // Renames store the new title verbatim, the empty string included.
        if self.title.len() > 256 {
            return Err(ContractViolation::InvalidValue {
                field: "document_row.title",
                reason: "exceeds max length",
            });
        }
        validate_id("document_row.file_name", &self.file_name, 256)?;
        validate_id("document_row.content_type", &self.content_type, 128)?;
        validate_hash_hex("document_row.content_hash", &self.content_hash)?;
        Ok(())
    }
}

/// Read model returned by document list operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document_id: DocumentId,
    pub title: String,
    pub file_name: String,
}

impl DocumentSummary {
    pub fn from_row(row: &DocumentRow) -> Self {
        Self {
            document_id: row.document_id,
            title: row.title.clone(),
            file_name: row.file_name.clone(),
        }
    }
}
