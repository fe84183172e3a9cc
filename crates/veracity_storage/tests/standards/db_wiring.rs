#![forbid(unsafe_code)]

use veracity_contracts::standards::{
    ApplicationMode, AvailableStandardRow, StandardSelectionRow,
};
use veracity_contracts::AssessmentId;
use veracity_storage::store::{AssessmentStore, StorageError};

fn standard(aid: u64, set_name: &str, selected: bool) -> AvailableStandardRow {
    AvailableStandardRow::v1(AssessmentId(aid), set_name.to_string(), selected).unwrap()
}

#[test]
fn at_std_db_01_get_or_create_materializes_default_row() {
    let mut s = AssessmentStore::new_in_memory();
    assert!(s.standard_selection_row(AssessmentId(7)).is_none());

    let row = s.get_or_create_standard_selection(AssessmentId(7)).unwrap();
    assert_eq!(row.application_mode_label, "Questions Based");
    assert_eq!(row.resolved_mode(), ApplicationMode::Questions);
    assert_eq!(row.selected_sal_level, None);

    let persisted = s.standard_selection_row(AssessmentId(7)).unwrap();
    assert_eq!(persisted.application_mode_label, "Questions Based");
}

#[test]
fn at_std_db_02_get_or_create_never_resets_an_existing_row() {
    let mut s = AssessmentStore::new_in_memory();
    s.set_standard_selection_mode(AssessmentId(7), ApplicationMode::Requirements)
        .unwrap();

    let row = s.get_or_create_standard_selection(AssessmentId(7)).unwrap();
    assert_eq!(row.application_mode_label, "Requirements Based");
    assert_eq!(row.resolved_mode(), ApplicationMode::Requirements);
}

#[test]
fn at_std_db_03_set_mode_updates_or_inserts() {
    let mut s = AssessmentStore::new_in_memory();

    s.set_standard_selection_mode(AssessmentId(7), ApplicationMode::Requirements)
        .unwrap();
    assert_eq!(
        s.standard_selection_row(AssessmentId(7))
            .unwrap()
            .application_mode_label,
        "Requirements Based"
    );

    s.set_standard_selection_mode(AssessmentId(7), ApplicationMode::Questions)
        .unwrap();
    assert_eq!(
        s.standard_selection_row(AssessmentId(7))
            .unwrap()
            .application_mode_label,
        "Questions Based"
    );
}

#[test]
fn at_std_db_04_set_sal_level_preserves_mode_label() {
    let mut s = AssessmentStore::new_in_memory();
    s.set_standard_selection_mode(AssessmentId(7), ApplicationMode::Requirements)
        .unwrap();

    s.set_selected_sal_level(AssessmentId(7), Some("High".to_string()))
        .unwrap();
    let row = s.standard_selection_row(AssessmentId(7)).unwrap();
    assert_eq!(row.application_mode_label, "Requirements Based");
    assert_eq!(row.selected_sal_level.as_deref(), Some("High"));

    // Absent row: the level write materializes the Questions default.
    s.set_selected_sal_level(AssessmentId(8), Some("Low".to_string()))
        .unwrap();
    let fresh = s.standard_selection_row(AssessmentId(8)).unwrap();
    assert_eq!(fresh.application_mode_label, "Questions Based");
    assert_eq!(fresh.selected_sal_level.as_deref(), Some("Low"));
}

#[test]
fn at_std_db_05_selected_standard_names_filters_by_assessment_and_flag() {
    let mut s = AssessmentStore::new_in_memory();
    s.upsert_available_standard(standard(7, "ACET", true)).unwrap();
    s.upsert_available_standard(standard(7, "CFATS", true)).unwrap();
    s.upsert_available_standard(standard(7, "NERC", false)).unwrap();
    s.upsert_available_standard(standard(8, "ACET", true)).unwrap();

    let names = s.selected_standard_names(AssessmentId(7));
    assert_eq!(names.len(), 2);
    assert!(names.contains("ACET"));
    assert!(names.contains("CFATS"));
    assert!(!names.contains("NERC"));
}

#[test]
fn at_std_db_06_available_standard_upsert_overwrites_on_natural_key() {
    let mut s = AssessmentStore::new_in_memory();
    s.upsert_available_standard(standard(7, "ACET", true)).unwrap();
    s.upsert_available_standard(standard(7, "ACET", false)).unwrap();

    assert!(s.selected_standard_names(AssessmentId(7)).is_empty());
}

#[test]
fn at_std_db_07_seeded_legacy_label_survives_get_or_create() {
    let mut s = AssessmentStore::new_in_memory();
    let legacy =
        StandardSelectionRow::v1(AssessmentId(7), "hybrid model".to_string(), None).unwrap();
    s.upsert_standard_selection(legacy).unwrap();

    let row = s.get_or_create_standard_selection(AssessmentId(7)).unwrap();
    assert_eq!(row.application_mode_label, "hybrid model");
    assert_eq!(row.resolved_mode(), ApplicationMode::Questions);
}

#[test]
fn at_std_db_08_zero_assessment_id_rejected() {
    let mut s = AssessmentStore::new_in_memory();
    assert!(matches!(
        s.get_or_create_standard_selection(AssessmentId(0)),
        Err(StorageError::ContractViolation(_))
    ));
    assert!(matches!(
        s.set_standard_selection_mode(AssessmentId(0), ApplicationMode::Questions),
        Err(StorageError::ContractViolation(_))
    ));
}
