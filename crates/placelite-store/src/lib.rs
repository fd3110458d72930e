//! # Placelite Store
//!
//! The relational store behind the analytics engine: four tables keyed by
//! student id, persisted as checksummed table files and loaded fully into
//! memory at open. The store is read-only after load; queries borrow it
//! for the duration of a single invocation and hold no state across calls.

#![warn(clippy::all)]

pub mod table_file;

use placelite_core::{
    Error, PlacementRecord, PlacementStatus, ProgrammingRecord, Result, SoftSkillsProfile, Student,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// File name of the students table.
pub const STUDENTS_FILE: &str = "students.tbl";
/// File name of the programming table.
pub const PROGRAMMING_FILE: &str = "programming.tbl";
/// File name of the soft-skills table.
pub const SOFT_SKILLS_FILE: &str = "soft_skills.tbl";
/// File name of the placements table.
pub const PLACEMENTS_FILE: &str = "placements.tbl";

/// The four required table files, in load order.
pub const REQUIRED_TABLES: [&str; 4] = [
    STUDENTS_FILE,
    PROGRAMMING_FILE,
    SOFT_SKILLS_FILE,
    PLACEMENTS_FILE,
];

/// An owned four-table dataset. The building block for in-memory stores
/// and test fixtures.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub programming: Vec<ProgrammingRecord>,
    pub soft_skills: Vec<SoftSkillsProfile>,
    pub placements: Vec<PlacementRecord>,
}

/// Read-only store over the four tables, with id-keyed lookup maps built
/// once at load.
#[derive(Debug)]
pub struct StudentStore {
    students: Vec<Student>,
    programming: Vec<ProgrammingRecord>,
    soft_skills: Vec<SoftSkillsProfile>,
    placements: Vec<PlacementRecord>,
    /// student_id -> indexes into `programming`
    programming_index: HashMap<u32, Vec<usize>>,
    /// student_id -> index into `soft_skills`
    soft_skills_index: HashMap<u32, usize>,
    /// student_id -> index into `placements`
    placements_index: HashMap<u32, usize>,
}

impl StudentStore {
    /// Open a store directory, loading all four table files.
    ///
    /// A missing file is a [`Error::MissingTable`]; an unreadable one is
    /// [`Error::Corrupt`]. Both are connectivity failures.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        for name in REQUIRED_TABLES {
            if !dir.join(name).exists() {
                return Err(Error::MissingTable(name.to_string()));
            }
        }

        let students = table_file::read_table(dir.join(STUDENTS_FILE))?;
        let programming = table_file::read_table(dir.join(PROGRAMMING_FILE))?;
        let soft_skills = table_file::read_table(dir.join(SOFT_SKILLS_FILE))?;
        let placements = table_file::read_table(dir.join(PLACEMENTS_FILE))?;

        let store = Self::from_tables(students, programming, soft_skills, placements);
        info!(
            path = %dir.display(),
            students = store.students.len(),
            programming_records = store.programming.len(),
            "opened student store"
        );
        Ok(store)
    }

    /// Build a store directly from an owned dataset, without touching disk.
    pub fn in_memory(dataset: Dataset) -> Self {
        Self::from_tables(
            dataset.students,
            dataset.programming,
            dataset.soft_skills,
            dataset.placements,
        )
    }

    fn from_tables(
        students: Vec<Student>,
        programming: Vec<ProgrammingRecord>,
        soft_skills: Vec<SoftSkillsProfile>,
        placements: Vec<PlacementRecord>,
    ) -> Self {
        let mut programming_index: HashMap<u32, Vec<usize>> = HashMap::new();
        for (i, record) in programming.iter().enumerate() {
            programming_index
                .entry(record.student_id)
                .or_default()
                .push(i);
        }

        let mut soft_skills_index = HashMap::new();
        for (i, profile) in soft_skills.iter().enumerate() {
            if soft_skills_index.insert(profile.student_id, i).is_some() {
                warn!(student_id = profile.student_id, "duplicate soft-skills profile");
            }
        }

        let mut placements_index = HashMap::new();
        for (i, record) in placements.iter().enumerate() {
            if placements_index.insert(record.student_id, i).is_some() {
                warn!(student_id = record.student_id, "duplicate placement record");
            }
        }

        Self {
            students,
            programming,
            soft_skills,
            placements,
            programming_index,
            soft_skills_index,
            placements_index,
        }
    }

    /// Persist the four tables to `dir`, creating it if needed.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        table_file::write_table(dir.join(STUDENTS_FILE), &self.students)?;
        table_file::write_table(dir.join(PROGRAMMING_FILE), &self.programming)?;
        table_file::write_table(dir.join(SOFT_SKILLS_FILE), &self.soft_skills)?;
        table_file::write_table(dir.join(PLACEMENTS_FILE), &self.placements)?;

        debug!(path = %dir.display(), "saved student store");
        Ok(())
    }

    /// Check the dataset invariants: every student has exactly one
    /// soft-skills profile and one placement record, and company/package
    /// presence matches the placement status.
    pub fn validate(&self) -> Result<()> {
        for student in &self.students {
            let id = student.student_id;
            if !self.soft_skills_index.contains_key(&id) {
                return Err(Error::InvariantViolation(format!(
                    "student {} has no soft-skills profile",
                    id
                )));
            }
            if !self.placements_index.contains_key(&id) {
                return Err(Error::InvariantViolation(format!(
                    "student {} has no placement record",
                    id
                )));
            }
        }

        for placement in &self.placements {
            if !placement.is_consistent() {
                return Err(Error::InvariantViolation(format!(
                    "student {} has company/package inconsistent with status {}",
                    placement.student_id, placement.status
                )));
            }
        }

        Ok(())
    }

    /// All students, in stored order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All programming records, in stored order.
    pub fn programming(&self) -> &[ProgrammingRecord] {
        &self.programming
    }

    /// All soft-skills profiles, in stored order.
    pub fn soft_skills(&self) -> &[SoftSkillsProfile] {
        &self.soft_skills
    }

    /// All placement records, in stored order.
    pub fn placements(&self) -> &[PlacementRecord] {
        &self.placements
    }

    /// Programming records for one student, in stored order.
    pub fn programming_for(&self, student_id: u32) -> Vec<&ProgrammingRecord> {
        self.programming_index
            .get(&student_id)
            .map(|indexes| indexes.iter().map(|&i| &self.programming[i]).collect())
            .unwrap_or_default()
    }

    /// The soft-skills profile for one student.
    pub fn soft_skills_for(&self, student_id: u32) -> Option<&SoftSkillsProfile> {
        self.soft_skills_index
            .get(&student_id)
            .map(|&i| &self.soft_skills[i])
    }

    /// The placement record for one student.
    pub fn placement_for(&self, student_id: u32) -> Option<&PlacementRecord> {
        self.placements_index
            .get(&student_id)
            .map(|&i| &self.placements[i])
    }

    /// Number of students with the given status.
    pub fn count_with_status(&self, status: PlacementStatus) -> usize {
        self.placements.iter().filter(|p| p.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placelite_core::PlacementStatus;
    use tempfile::tempdir;

    fn student(id: u32, batch: &str, city: &str) -> Student {
        Student {
            student_id: id,
            name: format!("Student {}", id),
            age: 22,
            gender: "Male".into(),
            email: format!("s{}@example.com", id),
            phone: "8888888888".into(),
            enrollment_year: 2023,
            course_batch: batch.into(),
            city: city.into(),
            graduation_year: 2025,
        }
    }

    fn small_dataset() -> Dataset {
        Dataset {
            students: vec![student(1, "DS_2023_A", "Pune"), student(2, "DS_2023_B", "Delhi")],
            programming: vec![
                ProgrammingRecord::new(1, "Python", 120, 10, 3, 2, 88),
                ProgrammingRecord::new(1, "SQL", 60, 5, 1, 1, 75),
            ],
            soft_skills: vec![
                SoftSkillsProfile::new(1, 80, 70, 90, 60, 75, 85),
                SoftSkillsProfile::new(2, 50, 55, 45, 60, 52, 58),
            ],
            placements: vec![
                PlacementRecord::placed(1, 85, 2, 4, "TCS", 750_000),
                PlacementRecord::unplaced(2, PlacementStatus::InProgress, 48, 0, 1),
            ],
        }
    }

    #[test]
    fn test_in_memory_lookups() {
        let store = StudentStore::in_memory(small_dataset());

        assert_eq!(store.students().len(), 2);
        assert_eq!(store.programming_for(1).len(), 2);
        assert!(store.programming_for(2).is_empty());
        assert_eq!(store.soft_skills_for(2).unwrap().communication, 50);
        assert_eq!(
            store.placement_for(1).unwrap().company_name.as_deref(),
            Some("TCS")
        );
        assert_eq!(store.count_with_status(PlacementStatus::Placed), 1);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let store = StudentStore::in_memory(small_dataset());
        store.save_to(dir.path()).unwrap();

        let reopened = StudentStore::open(dir.path()).unwrap();
        assert_eq!(reopened.students(), store.students());
        assert_eq!(reopened.programming(), store.programming());
        assert_eq!(reopened.placements(), store.placements());
        reopened.validate().unwrap();
    }

    #[test]
    fn test_missing_table_is_connectivity_failure() {
        let dir = tempdir().unwrap();
        let store = StudentStore::in_memory(small_dataset());
        store.save_to(dir.path()).unwrap();
        fs::remove_file(dir.path().join(PLACEMENTS_FILE)).unwrap();

        let err = StudentStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_validate_catches_missing_profile() {
        let mut dataset = small_dataset();
        dataset.soft_skills.pop();
        let store = StudentStore::in_memory(dataset);

        let err = store.validate().unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_validate_catches_inconsistent_placement() {
        let mut dataset = small_dataset();
        // Hand-build a record that breaks the package-iff-placed rule
        dataset.placements[1] = PlacementRecord {
            student_id: 2,
            mock_interview_score: 48,
            internships_completed: 0,
            interview_rounds_cleared: 1,
            status: PlacementStatus::InProgress,
            company_name: None,
            package_amount: Some(100_000),
        };
        let store = StudentStore::in_memory(dataset);

        let err = store.validate().unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }
}
