#![forbid(unsafe_code)]

use veracity_contracts::answer::AnswerSubmission;
use veracity_contracts::document::{DocumentUpload, TITLE_PLACEHOLDER};
use veracity_contracts::{AnswerId, AssessmentId, DocumentId, QuestionOrRequirementId};
use veracity_storage::store::{content_hash_hex, AssessmentStore, StorageError};

fn seeded_answer(s: &mut AssessmentStore, aid: u64, target: u64) -> AnswerId {
    let submission = AnswerSubmission::v1(
        AssessmentId(aid),
        QuestionOrRequirementId(target),
        1,
        Some("Y".to_string()),
        None,
        None,
        false,
    )
    .unwrap();
    s.upsert_answer(&submission, false).unwrap()
}

fn upload(aid: u64, answer_id: AnswerId, title: &str, file_name: &str, bytes: &[u8]) -> DocumentUpload {
    DocumentUpload::v1(
        AssessmentId(aid),
        answer_id,
        title.to_string(),
        file_name.to_string(),
        "application/pdf".to_string(),
        content_hash_hex(bytes),
        bytes.to_vec(),
    )
    .unwrap()
}

#[test]
fn at_doc_db_01_insert_assigns_id_and_indexes_hash() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "Policy", "policy.pdf", b"bytes-1"))
        .unwrap();

    assert_eq!(
        s.document_by_hash(AssessmentId(11), &content_hash_hex(b"bytes-1")),
        Some(doc)
    );
    let row = s.document_row(doc).unwrap();
    assert_eq!(row.title, "Policy");
    assert_eq!(row.file_name, "policy.pdf");
    assert_eq!(row.bytes, b"bytes-1".to_vec());
}

#[test]
fn at_doc_db_02_duplicate_hash_in_same_assessment_rejected() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    s.insert_document(upload(11, answer, "first", "a.pdf", b"bytes-1"))
        .unwrap();

    assert!(matches!(
        s.insert_document(upload(11, answer, "second", "b.pdf", b"bytes-1")),
        Err(StorageError::DuplicateKey { .. })
    ));
}

#[test]
fn at_doc_db_03_same_bytes_in_different_assessments_allowed() {
    let mut s = AssessmentStore::new_in_memory();
    let answer_a = seeded_answer(&mut s, 11, 901);
    let answer_b = seeded_answer(&mut s, 12, 901);

    let doc_a = s
        .insert_document(upload(11, answer_a, "a", "a.pdf", b"shared"))
        .unwrap();
    let doc_b = s
        .insert_document(upload(12, answer_b, "b", "b.pdf", b"shared"))
        .unwrap();

    assert_ne!(doc_a, doc_b);
    let hash = content_hash_hex(b"shared");
    assert_eq!(s.document_by_hash(AssessmentId(11), &hash), Some(doc_a));
    assert_eq!(s.document_by_hash(AssessmentId(12), &hash), Some(doc_b));
}

#[test]
fn at_doc_db_04_metadata_update_keeps_bytes_and_content_type() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "old", "old.pdf", b"bytes-1"))
        .unwrap();

    s.update_document_metadata(doc, "new title", "new.pdf").unwrap();

    let row = s.document_row(doc).unwrap();
    assert_eq!(row.title, "new title");
    assert_eq!(row.file_name, "new.pdf");
    assert_eq!(row.content_type, "application/pdf");
    assert_eq!(row.bytes, b"bytes-1".to_vec());
    assert_eq!(row.content_hash, content_hash_hex(b"bytes-1"));
}

#[test]
fn at_doc_db_05_link_is_idempotent() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "t", "t.pdf", b"bytes-1"))
        .unwrap();

    assert!(s.link_document_answer(doc, answer).unwrap());
    assert!(!s.link_document_answer(doc, answer).unwrap());
    assert_eq!(s.links_for_document(doc), vec![answer]);
    assert_eq!(s.links_for_answer(answer), vec![doc]);
}

#[test]
fn at_doc_db_06_link_requires_matching_assessment() {
    let mut s = AssessmentStore::new_in_memory();
    let answer_a = seeded_answer(&mut s, 11, 901);
    let answer_b = seeded_answer(&mut s, 12, 901);
    let doc = s
        .insert_document(upload(11, answer_a, "t", "t.pdf", b"bytes-1"))
        .unwrap();

    assert!(matches!(
        s.link_document_answer(doc, answer_b),
        Err(StorageError::ForeignKeyViolation {
            table: "document_answers.assessment_scope",
            ..
        })
    ));
}

#[test]
fn at_doc_db_07_link_rejects_unknown_sides() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "t", "t.pdf", b"bytes-1"))
        .unwrap();

    assert!(matches!(
        s.link_document_answer(DocumentId(4040), answer),
        Err(StorageError::ForeignKeyViolation {
            table: "document_answers.document_id",
            ..
        })
    ));
    assert!(matches!(
        s.link_document_answer(doc, AnswerId(4040)),
        Err(StorageError::ForeignKeyViolation {
            table: "document_answers.answer_id",
            ..
        })
    ));
}

#[test]
fn at_doc_db_08_remove_document_frees_hash_key() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "t", "t.pdf", b"bytes-1"))
        .unwrap();
    s.link_document_answer(doc, answer).unwrap();

    assert!(s.unlink_document_answer(doc, answer));
    assert!(!s.unlink_document_answer(doc, answer));

    s.remove_document(doc).unwrap();
    assert!(s.document_row(doc).is_none());
    assert_eq!(
        s.document_by_hash(AssessmentId(11), &content_hash_hex(b"bytes-1")),
        None
    );

    // The same bytes can be stored again once the row is gone.
    let again = s
        .insert_document(upload(11, answer, "t", "t.pdf", b"bytes-1"))
        .unwrap();
    assert_ne!(again, doc);
}

#[test]
fn at_doc_db_09_remove_document_clears_remaining_links() {
    let mut s = AssessmentStore::new_in_memory();
    let answer_a = seeded_answer(&mut s, 11, 901);
    let answer_b = seeded_answer(&mut s, 11, 902);
    let doc = s
        .insert_document(upload(11, answer_a, "t", "t.pdf", b"bytes-1"))
        .unwrap();
    s.link_document_answer(doc, answer_a).unwrap();
    s.link_document_answer(doc, answer_b).unwrap();

    s.remove_document(doc).unwrap();
    assert!(s.links_for_answer(answer_a).is_empty());
    assert!(s.links_for_answer(answer_b).is_empty());
}

#[test]
fn at_doc_db_10_rename_stores_title_verbatim() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "old", "t.pdf", b"bytes-1"))
        .unwrap();

    s.rename_document_title(doc, "").unwrap();
    assert_eq!(s.document_row(doc).unwrap().title, "");

    s.rename_document_title(doc, "  spaced  ").unwrap();
    assert_eq!(s.document_row(doc).unwrap().title, "  spaced  ");

    assert!(matches!(
        s.rename_document_title(DocumentId(4040), "x"),
        Err(StorageError::ForeignKeyViolation { .. })
    ));
}

#[test]
fn at_doc_db_11_blank_title_normalized_on_insert() {
    let mut s = AssessmentStore::new_in_memory();
    let answer = seeded_answer(&mut s, 11, 901);
    let doc = s
        .insert_document(upload(11, answer, "   ", "t.pdf", b"bytes-1"))
        .unwrap();
    assert_eq!(s.document_row(doc).unwrap().title, TITLE_PLACEHOLDER);
}

#[test]
fn at_doc_db_12_content_hash_hex_matches_sha256_vectors() {
    assert_eq!(
        content_hash_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        content_hash_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
