/// Tests for persistence, health probing, and the dataset summary surface
use placelite::{EligibilityCriteria, Error, PlacementDb};

mod common;

#[test]
fn test_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = common::cohort_db();
    db.save_to(dir.path()).unwrap();

    let reopened = PlacementDb::open(dir.path()).unwrap();
    assert!(reopened.test_connection());
    assert_eq!(reopened.store().students().len(), 8);

    // Same data, same answers
    let criteria = EligibilityCriteria::new().with_min_problems_solved(50);
    assert_eq!(
        reopened.find_eligible(&criteria),
        db.find_eligible(&criteria)
    );
}

#[test]
fn test_open_missing_directory_is_connectivity_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = PlacementDb::open(dir.path().join("nowhere")).unwrap_err();
    assert!(err.is_connectivity());
}

#[test]
fn test_open_with_deleted_table_is_connectivity_failure() {
    let dir = tempfile::tempdir().unwrap();
    common::cohort_db().save_to(dir.path()).unwrap();
    std::fs::remove_file(dir.path().join(placelite::PLACEMENTS_FILE)).unwrap();

    let err = PlacementDb::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::MissingTable(_)));
    assert!(err.is_connectivity());
}

#[test]
fn test_invalid_dataset_rejected_at_open() {
    let mut dataset = common::cohort();
    dataset.soft_skills.pop();
    let err = PlacementDb::in_memory(dataset).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
    assert!(!err.is_connectivity());
}

#[test]
fn test_filter_options_are_sorted_distinct() {
    let db = common::cohort_db();
    let options = db.filter_options();

    assert_eq!(options.course_batches, vec!["DS_2023_A", "DS_2023_B"]);
    assert_eq!(options.cities, vec!["Delhi", "Pune"]);
    assert_eq!(options.programming_languages, vec!["Java", "Python", "SQL"]);
    assert_eq!(options.companies, vec!["Google", "TCS"]);
    assert_eq!(
        options.placement_statuses,
        vec!["Not Ready", "In Progress", "Ready", "Placed"]
    );
}

#[test]
fn test_summary_counts() {
    let db = common::cohort_db();
    let summary = db.summary();

    assert_eq!(summary.total_students, 8);
    assert_eq!(summary.programming_records, 8);
    assert_eq!(summary.placement_distribution.get("Placed"), Some(&3));
    assert_eq!(summary.placement_distribution.get("Ready"), Some(&2));
    assert_eq!(summary.placement_distribution.get("In Progress"), Some(&1));
    assert_eq!(summary.placement_distribution.get("Not Ready"), Some(&2));
}

#[test]
fn test_clones_share_the_store() {
    let db = common::cohort_db();
    let clone = db.clone();
    assert_eq!(
        db.find_eligible(&EligibilityCriteria::new()),
        clone.find_eligible(&EligibilityCriteria::new())
    );
}
