//! Insight catalogue example: run every aggregate query over a small
//! cohort and print each result.

use placelite::logging::LogConfig;
use placelite::{
    Dataset, InsightQuery, PlacementDb, PlacementRecord, PlacementStatus, ProgrammingRecord,
    Result, SoftSkillsProfile, Student,
};

fn student(id: u32, name: &str, batch: &str, city: &str) -> Student {
    Student {
        student_id: id,
        name: name.to_string(),
        age: 23,
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
            student(2, "Ravi Kumar", "DS_2023_A", "Pune"),
            student(3, "Meera Iyer", "DS_2023_A", "Pune"),
            student(4, "Karan Shah", "DS_2023_B", "Pune"),
            student(5, "Divya Nair", "DS_2023_B", "Pune"),
            student(6, "Arjun Rao", "DS_2023_B", "Delhi"),
            student(7, "Sneha Patil", "DS_2023_B", "Pune"),
            student(8, "Vikram Joshi", "DS_2023_A", "Delhi"),
        ],
        programming: vec![
            ProgrammingRecord::new(1, "Python", 120, 12, 4, 2, 90),
            ProgrammingRecord::new(1, "SQL", 60, 6, 2, 1, 75),
            ProgrammingRecord::new(2, "Python", 40, 4, 1, 0, 55),
            ProgrammingRecord::new(3, "Java", 80, 9, 3, 2, 85),
            ProgrammingRecord::new(4, "Python", 95, 8, 2, 1, 70),
            ProgrammingRecord::new(6, "Python", 20, 2, 0, 0, 40),
            ProgrammingRecord::new(7, "SQL", 70, 7, 2, 1, 92),
            ProgrammingRecord::new(8, "Java", 35, 3, 1, 0, 45),
        ],
        soft_skills: vec![
            SoftSkillsProfile::new(1, 80, 70, 90, 60, 75, 85),
            SoftSkillsProfile::new(2, 60, 62, 58, 64, 60, 56),
            SoftSkillsProfile::new(3, 90, 88, 92, 86, 94, 90),
            SoftSkillsProfile::new(4, 70, 72, 68, 74, 70, 66),
            SoftSkillsProfile::new(5, 84, 80, 88, 82, 86, 84),
            SoftSkillsProfile::new(6, 50, 48, 52, 46, 54, 50),
            SoftSkillsProfile::new(7, 78, 76, 80, 74, 82, 78),
            SoftSkillsProfile::new(8, 54, 52, 56, 50, 58, 54),
        ],
        placements: vec![
            PlacementRecord::placed(1, 85, 2, 4, "TCS", 750_000),
            PlacementRecord::unplaced(2, PlacementStatus::InProgress, 45, 1, 1),
            PlacementRecord::placed(3, 92, 3, 5, "Google", 1_200_000),
            PlacementRecord::unplaced(4, PlacementStatus::Ready, 75, 1, 2),
            PlacementRecord::unplaced(5, PlacementStatus::Ready, 88, 2, 3),
            PlacementRecord::unplaced(6, PlacementStatus::NotReady, 60, 0, 0),
            PlacementRecord::placed(7, 80, 1, 3, "TCS", 900_000),
            PlacementRecord::unplaced(8, PlacementStatus::NotReady, 55, 0, 1),
        ],
    }
}

fn main() -> Result<()> {
    let _guard = LogConfig::warn().init();

    println!("=== Placelite Insight Demo ===\n");

    let db = PlacementDb::in_memory(demo_cohort())?;

    for query in InsightQuery::ALL {
        let table = db.run_insight_query(query.name(), Some(5));
        println!("--- {} ---", query.name());
        println!("{}", table.columns.join(" | "));
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            println!("{}", cells.join(" | "));
        }
        println!();
    }

    Ok(())
}
