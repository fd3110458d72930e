//! The joined per-student view shared by the criteria compiler and the
//! insight queries.
//!
//! Soft skills and placements join inner (every student has exactly one of
//! each by invariant; a missing record is a query-execution failure), while
//! programming records join outer (students with none still appear, with
//! the programming side empty).

use placelite_core::{
    Error, PlacementRecord, ProgrammingRecord, Result, SoftSkillsProfile, Student,
};
use placelite_store::StudentStore;

/// One student with all related rows attached.
pub(crate) struct JoinedStudent<'a> {
    pub student: &'a Student,
    pub soft_skills: &'a SoftSkillsProfile,
    pub placement: &'a PlacementRecord,
    pub programming: Vec<&'a ProgrammingRecord>,
}

impl JoinedStudent<'_> {
    /// Unrounded soft-skills average.
    pub fn soft_skills_average(&self) -> f64 {
        self.soft_skills.average()
    }

    /// Max problems solved across all programming records, if any.
    pub fn max_problems_solved(&self) -> Option<u32> {
        self.programming.iter().map(|p| p.problems_solved).max()
    }

    /// Best project score across all programming records, if any.
    pub fn best_project_score(&self) -> Option<u32> {
        self.programming.iter().map(|p| p.latest_project_score).max()
    }
}

/// Join every student to its related rows, in stored student order.
pub(crate) fn join_all(store: &StudentStore) -> Result<Vec<JoinedStudent<'_>>> {
    store
        .students()
        .iter()
        .map(|student| {
            let id = student.student_id;
            let soft_skills = store.soft_skills_for(id).ok_or_else(|| {
                Error::InvariantViolation(format!("student {} has no soft-skills profile", id))
            })?;
            let placement = store.placement_for(id).ok_or_else(|| {
                Error::InvariantViolation(format!("student {} has no placement record", id))
            })?;
            Ok(JoinedStudent {
                student,
                soft_skills,
                placement,
                programming: store.programming_for(id),
            })
        })
        .collect()
}
