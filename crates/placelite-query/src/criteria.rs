//! The criteria-to-query compiler.
//!
//! An [`EligibilityCriteria`] is a sparse set of named thresholds and
//! filters. Compilation turns each supplied criterion into a named
//! predicate; the predicates are combined with logical AND, so an absent
//! criterion imposes no constraint and an empty criteria set matches every
//! student.
//!
//! Programming-level criteria (language, minimum problems solved, minimum
//! project score) filter a student's programming records first: the student
//! qualifies only if at least one record passes all of them, and the
//! denormalized summary fields are computed over the passing records only.

use crate::join::{join_all, JoinedStudent};
use crate::stats::{cmp_opt_desc, round1};
use placelite_core::{PlacementStatus, ProgrammingRecord, Result, Table, Value};
use placelite_store::StudentStore;
use std::collections::BTreeSet;
use tracing::debug;

/// A sparse set of eligibility criteria. Absent fields impose no
/// constraint.
#[derive(Debug, Clone, Default)]
pub struct EligibilityCriteria {
    pub min_problems_solved: Option<u32>,
    pub min_project_score: Option<u32>,
    pub min_soft_skills_avg: Option<f64>,
    pub min_interview_score: Option<u32>,
    pub min_internships: Option<u32>,
    pub language: Option<String>,
    pub statuses: Option<BTreeSet<PlacementStatus>>,
    pub course_batch: Option<String>,
    pub city: Option<String>,
}

impl EligibilityCriteria {
    /// A criteria set with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_problems_solved(mut self, min: u32) -> Self {
        self.min_problems_solved = Some(min);
        self
    }

    pub fn with_min_project_score(mut self, min: u32) -> Self {
        self.min_project_score = Some(min);
        self
    }

    pub fn with_min_soft_skills_avg(mut self, min: f64) -> Self {
        self.min_soft_skills_avg = Some(min);
        self
    }

    pub fn with_min_interview_score(mut self, min: u32) -> Self {
        self.min_interview_score = Some(min);
        self
    }

    pub fn with_min_internships(mut self, min: u32) -> Self {
        self.min_internships = Some(min);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Restrict to a set of acceptable placement statuses.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = PlacementStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_course_batch(mut self, batch: impl Into<String>) -> Self {
        self.course_batch = Some(batch.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Whether any programming-level criterion is supplied.
    fn has_programming_filter(&self) -> bool {
        self.min_problems_solved.is_some()
            || self.min_project_score.is_some()
            || self.language.is_some()
    }

    /// Whether a single programming record passes all supplied
    /// programming-level criteria.
    fn programming_record_passes(&self, record: &ProgrammingRecord) -> bool {
        if let Some(ref language) = self.language {
            if &record.language != language {
                return false;
            }
        }
        if let Some(min) = self.min_problems_solved {
            if record.problems_solved < min {
                return false;
            }
        }
        if let Some(min) = self.min_project_score {
            if record.latest_project_score < min {
                return false;
            }
        }
        true
    }

    /// Compile the supplied criteria into named AND-combined predicates
    /// over a candidate row.
    fn compile(&self) -> Vec<Predicate<'_>> {
        let mut predicates: Vec<Predicate<'_>> = Vec::new();

        if let Some(min) = self.min_problems_solved {
            predicates.push(Predicate {
                name: "min_problems_solved",
                test: Box::new(move |c| {
                    c.summary.as_ref().is_some_and(|s| s.max_problems_solved >= min)
                }),
            });
        }
        if let Some(min) = self.min_project_score {
            predicates.push(Predicate {
                name: "min_project_score",
                test: Box::new(move |c| {
                    c.summary.as_ref().is_some_and(|s| s.best_project_score >= min)
                }),
            });
        }
        if self.language.is_some() {
            predicates.push(Predicate {
                name: "language",
                test: Box::new(|c| c.summary.is_some()),
            });
        }
        if let Some(min) = self.min_soft_skills_avg {
            predicates.push(Predicate {
                name: "min_soft_skills_avg",
                test: Box::new(move |c| c.soft_skills_avg >= min),
            });
        }
        if let Some(min) = self.min_interview_score {
            predicates.push(Predicate {
                name: "min_interview_score",
                test: Box::new(move |c| c.joined.placement.mock_interview_score >= min),
            });
        }
        if let Some(min) = self.min_internships {
            predicates.push(Predicate {
                name: "min_internships",
                test: Box::new(move |c| c.joined.placement.internships_completed >= min),
            });
        }
        if let Some(ref statuses) = self.statuses {
            predicates.push(Predicate {
                name: "statuses",
                test: Box::new(move |c| statuses.contains(&c.joined.placement.status)),
            });
        }
        if let Some(ref batch) = self.course_batch {
            predicates.push(Predicate {
                name: "course_batch",
                test: Box::new(move |c| &c.joined.student.course_batch == batch),
            });
        }
        if let Some(ref city) = self.city {
            predicates.push(Predicate {
                name: "city",
                test: Box::new(move |c| &c.joined.student.city == city),
            });
        }

        predicates
    }
}

/// A named filter predicate over a candidate row.
struct Predicate<'c> {
    #[allow(dead_code)] // kept for tracing and future explain output
    name: &'static str,
    test: Box<dyn Fn(&Candidate<'_, '_>) -> bool + 'c>,
}

/// Denormalized programming summary over the records that passed the
/// programming-level criteria.
#[derive(Debug, Clone, PartialEq)]
struct ProgrammingSummary {
    max_problems_solved: u32,
    best_project_score: u32,
    /// Comma-joined distinct languages, in stored record order.
    languages: String,
}

fn summarize(records: &[&ProgrammingRecord]) -> Option<ProgrammingSummary> {
    if records.is_empty() {
        return None;
    }
    let mut languages: Vec<&str> = Vec::new();
    for record in records {
        if !languages.contains(&record.language.as_str()) {
            languages.push(&record.language);
        }
    }
    Some(ProgrammingSummary {
        max_problems_solved: records.iter().map(|r| r.problems_solved).max()?,
        best_project_score: records.iter().map(|r| r.latest_project_score).max()?,
        languages: languages.join(","),
    })
}

/// A joined student plus the programming summary under the current
/// criteria, as seen by the predicates.
struct Candidate<'a, 'j> {
    joined: &'j JoinedStudent<'a>,
    soft_skills_avg: f64,
    summary: Option<ProgrammingSummary>,
}

/// One row of the eligibility result.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleStudent {
    pub student_id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub course_batch: String,
    pub city: String,
    pub status: PlacementStatus,
    pub mock_interview_score: u32,
    pub internships_completed: u32,
    pub company_name: Option<String>,
    pub package_amount: Option<u64>,
    /// Soft-skills average, rounded to one decimal.
    pub avg_soft_skills: f64,
    /// Comma-joined distinct languages over the matching records.
    pub programming_languages: Option<String>,
    pub max_problems_solved: Option<u32>,
    pub best_project_score: Option<u32>,
}

/// Run the eligibility query: every student satisfying the conjunction of
/// all supplied criteria, ordered by soft-skills average descending, then
/// max problems solved descending (absent last), then interview score
/// descending. Ties keep stored order.
pub fn find_eligible(
    store: &StudentStore,
    criteria: &EligibilityCriteria,
) -> Result<Vec<EligibleStudent>> {
    let joined = join_all(store)?;
    let predicates = criteria.compile();
    let has_programming_filter = criteria.has_programming_filter();

    let mut eligible = Vec::new();
    for j in &joined {
        let passing: Vec<&ProgrammingRecord> = j
            .programming
            .iter()
            .copied()
            .filter(|r| criteria.programming_record_passes(r))
            .collect();
        // Without programming-level criteria the summary spans all records;
        // students with none still appear with the summary absent.
        let summary = if has_programming_filter {
            summarize(&passing)
        } else {
            summarize(&j.programming)
        };

        let candidate = Candidate {
            joined: j,
            soft_skills_avg: j.soft_skills_average(),
            summary,
        };

        if predicates.iter().all(|p| (p.test)(&candidate)) {
            let placement = candidate.joined.placement;
            let student = candidate.joined.student;
            eligible.push(EligibleStudent {
                student_id: student.student_id,
                name: student.name.clone(),
                age: student.age,
                gender: student.gender.clone(),
                email: student.email.clone(),
                phone: student.phone.clone(),
                course_batch: student.course_batch.clone(),
                city: student.city.clone(),
                status: placement.status,
                mock_interview_score: placement.mock_interview_score,
                internships_completed: placement.internships_completed,
                company_name: placement.company_name.clone(),
                package_amount: placement.package_amount,
                avg_soft_skills: round1(candidate.soft_skills_avg),
                programming_languages: candidate.summary.as_ref().map(|s| s.languages.clone()),
                max_problems_solved: candidate.summary.as_ref().map(|s| s.max_problems_solved),
                best_project_score: candidate.summary.as_ref().map(|s| s.best_project_score),
            });
        }
    }

    // Stable sort: ties preserve stored order for deterministic output.
    eligible.sort_by(|a, b| {
        b.avg_soft_skills
            .partial_cmp(&a.avg_soft_skills)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| cmp_opt_desc(&a.max_problems_solved, &b.max_problems_solved))
            .then_with(|| b.mock_interview_score.cmp(&a.mock_interview_score))
    });

    debug!(matched = eligible.len(), "eligibility query complete");
    Ok(eligible)
}

/// Render eligibility results as a table.
pub fn to_table(rows: &[EligibleStudent]) -> Table {
    let mut table = Table::new(vec![
        "student_id",
        "name",
        "age",
        "gender",
        "email",
        "phone",
        "course_batch",
        "city",
        "placement_status",
        "mock_interview_score",
        "internships_completed",
        "company_name",
        "package_amount",
        "avg_soft_skills",
        "programming_languages",
        "max_problems_solved",
        "best_project_score",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::Integer(i64::from(row.student_id)),
            Value::text(&row.name),
            Value::Integer(i64::from(row.age)),
            Value::text(&row.gender),
            Value::text(&row.email),
            Value::text(&row.phone),
            Value::text(&row.course_batch),
            Value::text(&row.city),
            Value::text(row.status.as_str()),
            Value::Integer(i64::from(row.mock_interview_score)),
            Value::Integer(i64::from(row.internships_completed)),
            Value::opt_text(row.company_name.as_deref()),
            Value::opt_integer(row.package_amount.map(|p| p as i64)),
            Value::Float(row.avg_soft_skills),
            Value::opt_text(row.programming_languages.as_deref()),
            Value::opt_integer(row.max_problems_solved.map(i64::from)),
            Value::opt_integer(row.best_project_score.map(i64::from)),
        ]);
    }
    table
}
