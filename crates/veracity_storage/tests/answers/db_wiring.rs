#![forbid(unsafe_code)]

use veracity_contracts::answer::AnswerSubmission;
use veracity_contracts::{AnswerId, AssessmentId, QuestionOrRequirementId};
use veracity_storage::store::{AssessmentStore, StorageError};

fn submission(aid: u64, target: u64, answer_text: Option<&str>) -> AnswerSubmission {
    AnswerSubmission::v1(
        AssessmentId(aid),
        QuestionOrRequirementId(target),
        1,
        answer_text.map(ToString::to_string),
        None,
        None,
        false,
    )
    .unwrap()
}

#[test]
fn at_ans_db_01_upsert_assigns_id_and_round_trips() {
    let mut s = AssessmentStore::new_in_memory();
    let id = s.upsert_answer(&submission(11, 901, Some("Y")), false).unwrap();
    assert_eq!(id, AnswerId(1));

    let row = s.answer_row(id).unwrap();
    assert_eq!(row.assessment_id, AssessmentId(11));
    assert_eq!(row.question_or_requirement_id, QuestionOrRequirementId(901));
    assert_eq!(row.answer_text, "Y");
    assert!(!row.is_requirement);
}

#[test]
fn at_ans_db_02_same_target_updates_in_place() {
    let mut s = AssessmentStore::new_in_memory();
    let first = s.upsert_answer(&submission(11, 901, Some("Y")), false).unwrap();
    let second = s.upsert_answer(&submission(11, 901, Some("N")), false).unwrap();

    assert_eq!(first, second);
    assert_eq!(s.answer_row(first).unwrap().answer_text, "N");
    assert_eq!(s.answer_rows_for_assessment(AssessmentId(11)).len(), 1);
}

#[test]
fn at_ans_db_03_distinct_targets_get_distinct_ids() {
    let mut s = AssessmentStore::new_in_memory();
    let a = s.upsert_answer(&submission(11, 901, Some("Y")), false).unwrap();
    let b = s.upsert_answer(&submission(11, 902, Some("N")), false).unwrap();

    assert_ne!(a, b);
    assert_eq!(s.answer_rows_for_assessment(AssessmentId(11)).len(), 2);
}

#[test]
fn at_ans_db_04_blank_text_persists_unanswered_sentinel() {
    let mut s = AssessmentStore::new_in_memory();
    let id = s.upsert_answer(&submission(11, 901, None), false).unwrap();
    assert_eq!(s.answer_row(id).unwrap().answer_text, "U");

    let updated = s.upsert_answer(&submission(11, 901, Some("   ")), false).unwrap();
    assert_eq!(updated, id);
    assert_eq!(s.answer_row(id).unwrap().answer_text, "U");
}

#[test]
fn at_ans_db_05_assessments_are_isolated() {
    let mut s = AssessmentStore::new_in_memory();
    let a = s.upsert_answer(&submission(11, 901, Some("Y")), false).unwrap();
    let b = s.upsert_answer(&submission(12, 901, Some("N")), false).unwrap();

    assert_ne!(a, b);
    assert_eq!(
        s.answer_row_by_target(AssessmentId(11), QuestionOrRequirementId(901))
            .unwrap()
            .answer_text,
        "Y"
    );
    assert_eq!(
        s.answer_row_by_target(AssessmentId(12), QuestionOrRequirementId(901))
            .unwrap()
            .answer_text,
        "N"
    );
}

#[test]
fn at_ans_db_06_requirement_flag_is_stored_and_updated() {
    let mut s = AssessmentStore::new_in_memory();
    let id = s.upsert_answer(&submission(11, 901, Some("Y")), true).unwrap();
    assert!(s.answer_row(id).unwrap().is_requirement);

    s.upsert_answer(&submission(11, 901, Some("Y")), false).unwrap();
    assert!(!s.answer_row(id).unwrap().is_requirement);
}

#[test]
fn at_ans_db_07_invalid_submission_rejected_before_write() {
    let mut s = AssessmentStore::new_in_memory();
    let mut bad = submission(11, 901, Some("Y"));
    bad.assessment_id = AssessmentId(0);

    assert!(matches!(
        s.upsert_answer(&bad, false),
        Err(StorageError::ContractViolation(_))
    ));
    assert!(s.answer_rows_for_assessment(AssessmentId(11)).is_empty());
}
