//! Eligibility filtering example: build a cohort, persist it, reopen it,
//! and run criteria-based queries against it.

use placelite::logging::LogConfig;
use placelite::{
    Dataset, EligibilityCriteria, PlacementDb, PlacementRecord, PlacementStatus,
    ProgrammingRecord, Result, SoftSkillsProfile, Student, Table,
};

fn student(id: u32, name: &str, batch: &str, city: &str) -> Student {
    Student {
        student_id: id,
        name: name.to_string(),
        age: 22,
        gender: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: format!("9{:09}", id),
        enrollment_year: 2023,
        course_batch: batch.to_string(),
        city: city.to_string(),
        graduation_year: 2025,
    }
}

fn demo_cohort() -> Dataset {
    Dataset {
        students: vec![
            student(1, "Asha Verma", "DS_2023_A", "Pune"),
            student(2, "Ravi Kumar", "DS_2023_A", "Delhi"),
            student(3, "Meera Iyer", "DS_2023_B", "Bangalore"),
            student(4, "Karan Shah", "DS_2023_B", "Pune"),
            student(5, "Divya Nair", "DS_2023_A", "Chennai"),
        ],
        programming: vec![
            ProgrammingRecord::new(1, "Python", 140, 12, 4, 2, 88),
            ProgrammingRecord::new(1, "SQL", 65, 6, 2, 1, 72),
            ProgrammingRecord::new(2, "Python", 45, 4, 1, 0, 58),
            ProgrammingRecord::new(3, "Python", 110, 10, 3, 2, 91),
            ProgrammingRecord::new(4, "Java", 85, 8, 2, 1, 77),
        ],
        soft_skills: vec![
            SoftSkillsProfile::new(1, 82, 74, 88, 66, 78, 84),
            SoftSkillsProfile::new(2, 58, 60, 55, 62, 57, 54),
            SoftSkillsProfile::new(3, 90, 86, 92, 84, 94, 88),
            SoftSkillsProfile::new(4, 72, 70, 74, 68, 76, 70),
            SoftSkillsProfile::new(5, 80, 78, 84, 76, 82, 80),
        ],
        placements: vec![
            PlacementRecord::placed(1, 86, 2, 4, "TCS", 780_000),
            PlacementRecord::unplaced(2, PlacementStatus::InProgress, 48, 0, 1),
            PlacementRecord::placed(3, 93, 3, 5, "Amazon", 1_500_000),
            PlacementRecord::unplaced(4, PlacementStatus::Ready, 76, 1, 2),
            PlacementRecord::unplaced(5, PlacementStatus::Ready, 84, 2, 3),
        ],
    }
}

fn print_table(table: &Table, max_rows: usize) {
    println!("  {}", table.columns.join(" | "));
    for row in table.rows.iter().take(max_rows) {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("  {}", cells.join(" | "));
    }
    if table.len() > max_rows {
        println!("  ... {} more rows", table.len() - max_rows);
    }
}

fn main() -> Result<()> {
    let _guard = LogConfig::info().init();

    println!("=== Placelite Eligibility Demo ===\n");

    // Build a cohort and persist it
    let db = PlacementDb::in_memory(demo_cohort())?;
    db.save_to("./placement_data")?;
    println!("Saved cohort to ./placement_data\n");

    // Reopen from disk
    let db = PlacementDb::open("./placement_data")?;
    assert!(db.test_connection());

    let summary = db.summary();
    println!("Cohort summary:");
    println!("  students: {}", summary.total_students);
    println!("  programming records: {}", summary.programming_records);
    for (status, count) in &summary.placement_distribution {
        println!("  {}: {}", status, count);
    }
    println!();

    // No criteria: everyone matches
    let all = db.find_eligible(&EligibilityCriteria::new());
    println!("No criteria -> {} students\n", all.len());

    // Strong Python candidates who are ready or already placed
    let criteria = EligibilityCriteria::new()
        .with_language("Python")
        .with_min_problems_solved(80)
        .with_min_soft_skills_avg(65.0)
        .with_statuses([PlacementStatus::Ready, PlacementStatus::Placed]);
    let eligible = db.find_eligible(&criteria);
    println!("Strong Python candidates -> {} students", eligible.len());
    print_table(&eligible, 5);
    println!();

    // The available filter values, for building a picker UI
    let options = db.filter_options();
    println!("Filterable languages: {}", options.programming_languages.join(", "));
    println!("Filterable cities: {}", options.cities.join(", "));

    Ok(())
}
