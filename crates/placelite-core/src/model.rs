//! Domain model: the four student-keyed entities.
//!
//! Every record is keyed by a `student_id`. A student has exactly one
//! [`SoftSkillsProfile`] and one [`PlacementRecord`], and zero or more
//! [`ProgrammingRecord`]s (one per programming language attempted).
//! All 0-100 scores are clamped at construction.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum value for any 0-100 score field.
pub const MAX_SCORE: u32 = 100;

/// Clamp a score into the [0, 100] range.
pub fn clamp_score(score: u32) -> u32 {
    score.min(MAX_SCORE)
}

/// A student profile. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub enrollment_year: u32,
    pub course_batch: String,
    pub city: String,
    pub graduation_year: u32,
}

/// Programming performance for one (student, language) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammingRecord {
    pub student_id: u32,
    pub language: String,
    pub problems_solved: u32,
    pub assessments_completed: u32,
    pub mini_projects: u32,
    pub certifications_earned: u32,
    /// Latest project score, clamped to [0, 100]
    pub latest_project_score: u32,
}

impl ProgrammingRecord {
    /// Create a record, clamping the project score.
    pub fn new(
        student_id: u32,
        language: impl Into<String>,
        problems_solved: u32,
        assessments_completed: u32,
        mini_projects: u32,
        certifications_earned: u32,
        latest_project_score: u32,
    ) -> Self {
        Self {
            student_id,
            language: language.into(),
            problems_solved,
            assessments_completed,
            mini_projects,
            certifications_earned,
            latest_project_score: clamp_score(latest_project_score),
        }
    }
}

/// Six soft-skill scores for one student, each clamped to [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftSkillsProfile {
    pub student_id: u32,
    pub communication: u32,
    pub teamwork: u32,
    pub presentation: u32,
    pub leadership: u32,
    pub critical_thinking: u32,
    pub interpersonal_skills: u32,
}

impl SoftSkillsProfile {
    /// Create a profile, clamping every score.
    pub fn new(
        student_id: u32,
        communication: u32,
        teamwork: u32,
        presentation: u32,
        leadership: u32,
        critical_thinking: u32,
        interpersonal_skills: u32,
    ) -> Self {
        Self {
            student_id,
            communication: clamp_score(communication),
            teamwork: clamp_score(teamwork),
            presentation: clamp_score(presentation),
            leadership: clamp_score(leadership),
            critical_thinking: clamp_score(critical_thinking),
            interpersonal_skills: clamp_score(interpersonal_skills),
        }
    }

    /// Mean of the six skill scores.
    pub fn average(&self) -> f64 {
        let sum = self.communication
            + self.teamwork
            + self.presentation
            + self.leadership
            + self.critical_thinking
            + self.interpersonal_skills;
        f64::from(sum) / 6.0
    }
}

/// Placement readiness status. Mutually exclusive per student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlacementStatus {
    NotReady,
    InProgress,
    Ready,
    Placed,
}

impl PlacementStatus {
    /// All statuses in canonical order.
    pub const ALL: [PlacementStatus; 4] = [
        PlacementStatus::NotReady,
        PlacementStatus::InProgress,
        PlacementStatus::Ready,
        PlacementStatus::Placed,
    ];

    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementStatus::NotReady => "Not Ready",
            PlacementStatus::InProgress => "In Progress",
            PlacementStatus::Ready => "Ready",
            PlacementStatus::Placed => "Placed",
        }
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Ready" => Ok(PlacementStatus::NotReady),
            "In Progress" => Ok(PlacementStatus::InProgress),
            "Ready" => Ok(PlacementStatus::Ready),
            "Placed" => Ok(PlacementStatus::Placed),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Placement outcome for one student.
///
/// `company_name` and `package_amount` are present iff the status is
/// [`PlacementStatus::Placed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub student_id: u32,
    /// Mock interview score, clamped to [0, 100]
    pub mock_interview_score: u32,
    pub internships_completed: u32,
    pub interview_rounds_cleared: u32,
    pub status: PlacementStatus,
    pub company_name: Option<String>,
    pub package_amount: Option<u64>,
}

impl PlacementRecord {
    /// A record for a student who has not been placed.
    pub fn unplaced(
        student_id: u32,
        status: PlacementStatus,
        mock_interview_score: u32,
        internships_completed: u32,
        interview_rounds_cleared: u32,
    ) -> Self {
        debug_assert!(status != PlacementStatus::Placed);
        Self {
            student_id,
            mock_interview_score: clamp_score(mock_interview_score),
            internships_completed,
            interview_rounds_cleared,
            status,
            company_name: None,
            package_amount: None,
        }
    }

    /// A record for a placed student, with company and package.
    pub fn placed(
        student_id: u32,
        mock_interview_score: u32,
        internships_completed: u32,
        interview_rounds_cleared: u32,
        company_name: impl Into<String>,
        package_amount: u64,
    ) -> Self {
        Self {
            student_id,
            mock_interview_score: clamp_score(mock_interview_score),
            internships_completed,
            interview_rounds_cleared,
            status: PlacementStatus::Placed,
            company_name: Some(company_name.into()),
            package_amount: Some(package_amount),
        }
    }

    /// Whether company/package presence matches the status.
    pub fn is_consistent(&self) -> bool {
        let placed = self.status == PlacementStatus::Placed;
        placed == self.company_name.is_some() && placed == self.package_amount.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(100), 100);
        assert_eq!(clamp_score(250), 100);
    }

    #[test]
    fn test_soft_skills_average() {
        let profile = SoftSkillsProfile::new(1, 80, 70, 90, 60, 75, 85);
        let rounded = (profile.average() * 10.0).round() / 10.0;
        assert_eq!(rounded, 76.7);
    }

    #[test]
    fn test_soft_skills_clamped_at_construction() {
        let profile = SoftSkillsProfile::new(1, 150, 70, 90, 60, 75, 85);
        assert_eq!(profile.communication, 100);
    }

    #[test]
    fn test_status_round_trip() {
        for status in PlacementStatus::ALL {
            assert_eq!(status.as_str().parse::<PlacementStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "Hired".parse::<PlacementStatus>().unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(_)));
    }

    #[test]
    fn test_placement_consistency() {
        let placed = PlacementRecord::placed(1, 80, 2, 3, "Acme", 900_000);
        assert!(placed.is_consistent());

        let ready = PlacementRecord::unplaced(2, PlacementStatus::Ready, 70, 1, 2);
        assert!(ready.is_consistent());
        assert!(ready.company_name.is_none());
        assert!(ready.package_amount.is_none());
    }
}
