/// Tests for the criteria-to-query compiler through the public facade
use placelite::{
    Dataset, EligibilityCriteria, PlacementDb, PlacementRecord, PlacementStatus,
    ProgrammingRecord, SoftSkillsProfile, Table,
};

mod common;

fn names(table: &Table) -> Vec<String> {
    (0..table.len())
        .map(|row| table.get(row, "name").unwrap().as_text().unwrap().to_string())
        .collect()
}

#[test]
fn test_empty_criteria_matches_everyone() {
    let db = common::cohort_db();
    let result = db.find_eligible(&EligibilityCriteria::new());
    assert_eq!(result.len(), 8);
}

#[test]
fn test_empty_criteria_orders_by_soft_skills() {
    let db = common::cohort_db();
    let result = db.find_eligible(&EligibilityCriteria::new());
    assert_eq!(
        names(&result),
        vec![
            "Meera Iyer",  // 90.0
            "Divya Nair",  // 84.0
            "Sneha Patil", // 78.0
            "Asha Verma",  // 76.7
            "Karan Shah",  // 70.0
            "Ravi Kumar",  // 60.0
            "Vikram Joshi", // 54.0
            "Arjun Rao",   // 50.0
        ]
    );
}

#[test]
fn test_min_problems_solved() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new().with_min_problems_solved(50);
    let result = db.find_eligible(&criteria);

    let matched = names(&result);
    assert_eq!(matched.len(), 4);
    assert!(matched.contains(&"Asha Verma".to_string()));
    assert!(matched.contains(&"Meera Iyer".to_string()));
    assert!(matched.contains(&"Karan Shah".to_string()));
    assert!(matched.contains(&"Sneha Patil".to_string()));
}

#[test]
fn test_language_filter_narrows_summary_to_matching_records() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new()
        .with_language("Python")
        .with_min_problems_solved(50);
    let result = db.find_eligible(&criteria);

    assert_eq!(names(&result), vec!["Asha Verma", "Karan Shah"]);

    // Asha also knows SQL, but the summary only covers the records that
    // passed the programming-level criteria.
    let asha = 0;
    assert_eq!(
        result.get(asha, "programming_languages").unwrap().as_text(),
        Some("Python")
    );
    assert_eq!(
        result.get(asha, "max_problems_solved").unwrap().as_integer(),
        Some(120)
    );
    assert_eq!(
        result.get(asha, "best_project_score").unwrap().as_integer(),
        Some(90)
    );
}

#[test]
fn test_language_filter_alone() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new().with_language("Python");
    let result = db.find_eligible(&criteria);
    assert_eq!(result.len(), 4); // students 1, 2, 4, 6
}

#[test]
fn test_min_soft_skills_avg() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new().with_min_soft_skills_avg(75.0);
    let result = db.find_eligible(&criteria);
    assert_eq!(
        names(&result),
        vec!["Meera Iyer", "Divya Nair", "Sneha Patil", "Asha Verma"]
    );
}

#[test]
fn test_status_filter() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new().with_statuses([PlacementStatus::Ready]);
    let result = db.find_eligible(&criteria);

    let matched = names(&result);
    assert_eq!(matched, vec!["Divya Nair", "Karan Shah"]);
}

#[test]
fn test_profile_filters_combine_with_and() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new()
        .with_city("Pune")
        .with_min_interview_score(80);
    let result = db.find_eligible(&criteria);
    assert_eq!(result.len(), 4); // students 1, 3, 5, 7
}

#[test]
fn test_programming_thresholds_must_hold_on_one_record() {
    let db = common::cohort_db();

    // Separately, both thresholds match someone...
    let by_problems = db.find_eligible(&EligibilityCriteria::new().with_min_problems_solved(100));
    assert_eq!(names(&by_problems), vec!["Asha Verma"]);
    let by_project = db.find_eligible(&EligibilityCriteria::new().with_min_project_score(91));
    assert_eq!(names(&by_project), vec!["Sneha Patil"]);

    // ...but no single record clears both, so the conjunction is empty.
    // Asha's 120 problems are on her Python record (project 90), Sneha's
    // project 92 is on a record with only 70 problems.
    let both = db.find_eligible(
        &EligibilityCriteria::new()
            .with_min_problems_solved(100)
            .with_min_project_score(91),
    );
    assert!(both.is_empty());
}

#[test]
fn test_student_without_programming_fails_programming_criteria() {
    let db = common::cohort_db();
    // Divya has no programming records: any programming-level criterion
    // excludes her, even a threshold of zero.
    let criteria = EligibilityCriteria::new().with_min_problems_solved(0);
    let result = db.find_eligible(&criteria);
    assert!(!names(&result).contains(&"Divya Nair".to_string()));

    // But profile-level criteria still reach her, with the programming
    // columns rendered as NULL.
    let criteria = EligibilityCriteria::new().with_min_interview_score(88);
    let result = db.find_eligible(&criteria);
    let divya = names(&result).iter().position(|n| n == "Divya Nair").unwrap();
    assert!(result.get(divya, "max_problems_solved").unwrap().is_null());
    assert!(result.get(divya, "programming_languages").unwrap().is_null());
}

#[test]
fn test_placed_students_expose_company_and_package() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new().with_statuses([PlacementStatus::Placed]);
    let result = db.find_eligible(&criteria);

    assert_eq!(result.len(), 3);
    for row in 0..result.len() {
        assert!(!result.get(row, "company_name").unwrap().is_null());
        assert!(!result.get(row, "package_amount").unwrap().is_null());
    }
}

#[test]
fn test_ties_keep_stored_order() {
    // Two students with identical soft skills, programming, and interview
    // scores: the result preserves their stored order.
    let mut dataset = Dataset::default();
    for (id, name) in [(1, "First Twin"), (2, "Second Twin")] {
        dataset.students.push(placelite::Student {
            student_id: id,
            name: name.to_string(),
            age: 22,
            gender: "Female".to_string(),
            email: format!("twin{}@example.com", id),
            phone: format!("9{:09}", id),
            enrollment_year: 2023,
            course_batch: "DS_2023_A".to_string(),
            city: "Pune".to_string(),
            graduation_year: 2025,
        });
        dataset
            .programming
            .push(ProgrammingRecord::new(id, "Python", 50, 5, 1, 1, 80));
        dataset
            .soft_skills
            .push(SoftSkillsProfile::new(id, 70, 70, 70, 70, 70, 70));
        dataset
            .placements
            .push(PlacementRecord::unplaced(id, PlacementStatus::Ready, 75, 1, 2));
    }
    let db = PlacementDb::in_memory(dataset).unwrap();

    let result = db.find_eligible(&EligibilityCriteria::new());
    assert_eq!(names(&result), vec!["First Twin", "Second Twin"]);
}

#[test]
fn test_no_matches_is_empty_table_on_healthy_engine() {
    let db = common::cohort_db();
    let criteria = EligibilityCriteria::new().with_city("Chennai");
    let result = db.find_eligible(&criteria);

    assert!(result.is_empty());
    assert!(db.test_connection());
}
