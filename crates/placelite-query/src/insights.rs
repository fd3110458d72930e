//! The fixed catalogue of aggregate insight queries.
//!
//! Each query is a pure read-only aggregation over the four-table view.
//! None accept criteria beyond an optional row limit; [`run`] dispatches by
//! [`InsightQuery`] and renders a [`Table`] for the presentation layer.
//!
//! Join semantics are uniform: soft skills and placements join inner
//! (guaranteed 1:1 by invariant), programming joins outer, so students
//! without programming records still appear in student-scoped queries with
//! the programming metrics absent.

use crate::join::{join_all, JoinedStudent};
use crate::stats::{cmp_f64_desc, cmp_opt_desc, mean, percent, round0, round1};
use placelite_core::{Error, PlacementStatus, Result, Table, Value};
use placelite_store::StudentStore;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Default row limit for the top-ready-students ranking.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// The ten insight queries, addressable by snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightQuery {
    TopReadyStudents,
    BatchPerformance,
    SoftSkillsDistribution,
    LocationSuccess,
    CompanyHiring,
    LanguageImpact,
    InternshipImpact,
    ImprovementNeeded,
    SkillsGap,
    ProgramEffectiveness,
}

impl InsightQuery {
    /// All queries, in catalogue order.
    pub const ALL: [InsightQuery; 10] = [
        InsightQuery::TopReadyStudents,
        InsightQuery::BatchPerformance,
        InsightQuery::SoftSkillsDistribution,
        InsightQuery::LocationSuccess,
        InsightQuery::CompanyHiring,
        InsightQuery::LanguageImpact,
        InsightQuery::InternshipImpact,
        InsightQuery::ImprovementNeeded,
        InsightQuery::SkillsGap,
        InsightQuery::ProgramEffectiveness,
    ];

    /// The canonical name used by `run_insight_query`.
    pub fn name(&self) -> &'static str {
        match self {
            InsightQuery::TopReadyStudents => "top_ready_students",
            InsightQuery::BatchPerformance => "batch_performance",
            InsightQuery::SoftSkillsDistribution => "soft_skills_distribution",
            InsightQuery::LocationSuccess => "location_success",
            InsightQuery::CompanyHiring => "company_hiring",
            InsightQuery::LanguageImpact => "language_impact",
            InsightQuery::InternshipImpact => "internship_impact",
            InsightQuery::ImprovementNeeded => "improvement_needed",
            InsightQuery::SkillsGap => "skills_gap",
            InsightQuery::ProgramEffectiveness => "program_effectiveness",
        }
    }
}

impl FromStr for InsightQuery {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        InsightQuery::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| Error::UnknownQuery(s.to_string()))
    }
}

/// Run one insight query and render it as a table. The optional limit
/// truncates the output of any query; the top-ready ranking defaults to
/// [`DEFAULT_TOP_LIMIT`] when no limit is given.
pub fn run(store: &StudentStore, query: InsightQuery, limit: Option<usize>) -> Result<Table> {
    let mut table = match query {
        InsightQuery::TopReadyStudents => {
            let rows = top_ready_students(store, limit.unwrap_or(DEFAULT_TOP_LIMIT))?;
            top_ready_table(&rows)
        }
        InsightQuery::BatchPerformance => batch_performance_table(&batch_performance(store)?),
        InsightQuery::SoftSkillsDistribution => {
            soft_skills_distribution_table(&soft_skills_distribution(store)?)
        }
        InsightQuery::LocationSuccess => location_success_table(&location_success(store)?),
        InsightQuery::CompanyHiring => company_hiring_table(&company_hiring(store)?),
        InsightQuery::LanguageImpact => language_impact_table(&language_impact(store)?),
        InsightQuery::InternshipImpact => internship_impact_table(&internship_impact(store)?),
        InsightQuery::ImprovementNeeded => improvement_needed_table(&improvement_needed(store)?),
        InsightQuery::SkillsGap => skills_gap_table(&skills_gap(store)?),
        InsightQuery::ProgramEffectiveness => {
            program_effectiveness_table(&program_effectiveness(store)?)
        }
    };
    if let Some(limit) = limit {
        table.truncate(limit);
    }
    debug!(query = query.name(), rows = table.len(), "insight query complete");
    Ok(table)
}

// ---------------------------------------------------------------------
// 1. Top placement-ready students
// ---------------------------------------------------------------------

/// One row of the top-ready-students ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct TopReadyRow {
    pub name: String,
    pub course_batch: String,
    pub city: String,
    pub status: PlacementStatus,
    pub mock_interview_score: u32,
    pub internships_completed: u32,
    pub avg_soft_skills: f64,
    pub max_problems_solved: Option<u32>,
    pub best_project_score: Option<u32>,
    /// 0.4 x interview + 0.3 x soft-skills average + 0.3 x best project
    /// score; absent when the student has no programming records.
    pub overall_score: Option<f64>,
}

/// Students with status Ready or Placed, ranked by composite score
/// descending. Students without a best project score rank after all
/// scored ones; ties keep stored order.
pub fn top_ready_students(store: &StudentStore, limit: usize) -> Result<Vec<TopReadyRow>> {
    let joined = join_all(store)?;

    let mut rows: Vec<TopReadyRow> = joined
        .iter()
        .filter(|j| {
            matches!(
                j.placement.status,
                PlacementStatus::Ready | PlacementStatus::Placed
            )
        })
        .map(|j| {
            let soft_avg = j.soft_skills_average();
            let best_project = j.best_project_score();
            let overall = best_project.map(|best| {
                round1(
                    f64::from(j.placement.mock_interview_score) * 0.4
                        + soft_avg * 0.3
                        + f64::from(best) * 0.3,
                )
            });
            TopReadyRow {
                name: j.student.name.clone(),
                course_batch: j.student.course_batch.clone(),
                city: j.student.city.clone(),
                status: j.placement.status,
                mock_interview_score: j.placement.mock_interview_score,
                internships_completed: j.placement.internships_completed,
                avg_soft_skills: round1(soft_avg),
                max_problems_solved: j.max_problems_solved(),
                best_project_score: best_project,
                overall_score: overall,
            }
        })
        .collect();

    rows.sort_by(|a, b| cmp_opt_desc(&a.overall_score, &b.overall_score));
    rows.truncate(limit);
    Ok(rows)
}

fn top_ready_table(rows: &[TopReadyRow]) -> Table {
    let mut table = Table::new(vec![
        "name",
        "course_batch",
        "city",
        "placement_status",
        "mock_interview_score",
        "internships_completed",
        "avg_soft_skills",
        "max_problems_solved",
        "best_project_score",
        "overall_score",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.name),
            Value::text(&row.course_batch),
            Value::text(&row.city),
            Value::text(row.status.as_str()),
            Value::Integer(i64::from(row.mock_interview_score)),
            Value::Integer(i64::from(row.internships_completed)),
            Value::Float(row.avg_soft_skills),
            Value::opt_integer(row.max_problems_solved.map(i64::from)),
            Value::opt_integer(row.best_project_score.map(i64::from)),
            Value::opt_float(row.overall_score),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 2. Programming performance by batch
// ---------------------------------------------------------------------

/// Programming metrics aggregated over one course batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPerformanceRow {
    pub course_batch: String,
    pub total_students: usize,
    pub programming_records: usize,
    pub avg_problems_solved: Option<f64>,
    pub avg_project_score: Option<f64>,
    pub avg_assessments: Option<f64>,
    pub avg_mini_projects: Option<f64>,
    pub max_problems_solved: Option<u32>,
    pub min_problems_solved: Option<u32>,
}

/// Average and extreme programming metrics per batch, sorted by average
/// problems solved descending (batches without programming records last).
pub fn batch_performance(store: &StudentStore) -> Result<Vec<BatchPerformanceRow>> {
    let joined = join_all(store)?;

    let mut groups: BTreeMap<&str, Vec<&JoinedStudent<'_>>> = BTreeMap::new();
    for j in &joined {
        groups.entry(j.student.course_batch.as_str()).or_default().push(j);
    }

    let mut rows: Vec<BatchPerformanceRow> = groups
        .iter()
        .map(|(batch, members)| {
            let records: Vec<_> = members
                .iter()
                .flat_map(|j| j.programming.iter().copied())
                .collect();
            BatchPerformanceRow {
                course_batch: (*batch).to_string(),
                total_students: members.len(),
                programming_records: records.len(),
                avg_problems_solved: mean(records.iter().map(|r| f64::from(r.problems_solved)))
                    .map(round1),
                avg_project_score: mean(
                    records.iter().map(|r| f64::from(r.latest_project_score)),
                )
                .map(round1),
                avg_assessments: mean(
                    records.iter().map(|r| f64::from(r.assessments_completed)),
                )
                .map(round1),
                avg_mini_projects: mean(records.iter().map(|r| f64::from(r.mini_projects)))
                    .map(round1),
                max_problems_solved: records.iter().map(|r| r.problems_solved).max(),
                min_problems_solved: records.iter().map(|r| r.problems_solved).min(),
            }
        })
        .collect();

    rows.sort_by(|a, b| cmp_opt_desc(&a.avg_problems_solved, &b.avg_problems_solved));
    Ok(rows)
}

fn batch_performance_table(rows: &[BatchPerformanceRow]) -> Table {
    let mut table = Table::new(vec![
        "course_batch",
        "total_students",
        "programming_records",
        "avg_problems_solved",
        "avg_project_score",
        "avg_assessments",
        "avg_mini_projects",
        "max_problems_solved",
        "min_problems_solved",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.course_batch),
            Value::Integer(row.total_students as i64),
            Value::Integer(row.programming_records as i64),
            Value::opt_float(row.avg_problems_solved),
            Value::opt_float(row.avg_project_score),
            Value::opt_float(row.avg_assessments),
            Value::opt_float(row.avg_mini_projects),
            Value::opt_integer(row.max_problems_solved.map(i64::from)),
            Value::opt_integer(row.min_problems_solved.map(i64::from)),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 3. Soft-skills distribution by batch
// ---------------------------------------------------------------------

/// Per-skill averages over one course batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftSkillsDistributionRow {
    pub course_batch: String,
    pub student_count: usize,
    pub avg_communication: f64,
    pub avg_teamwork: f64,
    pub avg_presentation: f64,
    pub avg_leadership: f64,
    pub avg_critical_thinking: f64,
    pub avg_interpersonal: f64,
    pub overall_soft_skills: f64,
}

/// Per-skill and overall soft-skills averages per batch, sorted by the
/// overall average descending.
pub fn soft_skills_distribution(store: &StudentStore) -> Result<Vec<SoftSkillsDistributionRow>> {
    let joined = join_all(store)?;

    let mut groups: BTreeMap<&str, Vec<&JoinedStudent<'_>>> = BTreeMap::new();
    for j in &joined {
        groups.entry(j.student.course_batch.as_str()).or_default().push(j);
    }

    let avg_of = |members: &[&JoinedStudent<'_>], f: fn(&JoinedStudent<'_>) -> u32| -> f64 {
        round1(mean(members.iter().map(|j| f64::from(f(j)))).unwrap_or(0.0))
    };

    let mut rows: Vec<SoftSkillsDistributionRow> = groups
        .iter()
        .map(|(batch, members)| SoftSkillsDistributionRow {
            course_batch: (*batch).to_string(),
            student_count: members.len(),
            avg_communication: avg_of(members, |j| j.soft_skills.communication),
            avg_teamwork: avg_of(members, |j| j.soft_skills.teamwork),
            avg_presentation: avg_of(members, |j| j.soft_skills.presentation),
            avg_leadership: avg_of(members, |j| j.soft_skills.leadership),
            avg_critical_thinking: avg_of(members, |j| j.soft_skills.critical_thinking),
            avg_interpersonal: avg_of(members, |j| j.soft_skills.interpersonal_skills),
            overall_soft_skills: round1(
                mean(members.iter().map(|j| j.soft_skills_average())).unwrap_or(0.0),
            ),
        })
        .collect();

    rows.sort_by(|a, b| cmp_f64_desc(a.overall_soft_skills, b.overall_soft_skills));
    Ok(rows)
}

fn soft_skills_distribution_table(rows: &[SoftSkillsDistributionRow]) -> Table {
    let mut table = Table::new(vec![
        "course_batch",
        "student_count",
        "avg_communication",
        "avg_teamwork",
        "avg_presentation",
        "avg_leadership",
        "avg_critical_thinking",
        "avg_interpersonal",
        "overall_soft_skills",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.course_batch),
            Value::Integer(row.student_count as i64),
            Value::Float(row.avg_communication),
            Value::Float(row.avg_teamwork),
            Value::Float(row.avg_presentation),
            Value::Float(row.avg_leadership),
            Value::Float(row.avg_critical_thinking),
            Value::Float(row.avg_interpersonal),
            Value::Float(row.overall_soft_skills),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 4. Placement success by location
// ---------------------------------------------------------------------

/// Placement outcomes aggregated over one city.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSuccessRow {
    pub city: String,
    pub total_students: usize,
    pub placed_students: usize,
    pub placement_rate: f64,
    pub avg_package: Option<f64>,
    pub min_package: Option<u64>,
    pub max_package: Option<u64>,
    pub avg_interview_score: f64,
}

/// Placement rate and package statistics per city. Cities with fewer than
/// five students are excluded. Sorted by placement rate, then average
/// package, descending.
pub fn location_success(store: &StudentStore) -> Result<Vec<LocationSuccessRow>> {
    let joined = join_all(store)?;

    let mut groups: BTreeMap<&str, Vec<&JoinedStudent<'_>>> = BTreeMap::new();
    for j in &joined {
        groups.entry(j.student.city.as_str()).or_default().push(j);
    }

    let mut rows: Vec<LocationSuccessRow> = groups
        .iter()
        .filter(|(_, members)| members.len() >= 5)
        .map(|(city, members)| {
            let packages: Vec<u64> = members
                .iter()
                .filter(|j| j.placement.status == PlacementStatus::Placed)
                .filter_map(|j| j.placement.package_amount)
                .collect();
            let placed = members
                .iter()
                .filter(|j| j.placement.status == PlacementStatus::Placed)
                .count();
            LocationSuccessRow {
                city: (*city).to_string(),
                total_students: members.len(),
                placed_students: placed,
                placement_rate: round1(percent(placed, members.len())),
                avg_package: mean(packages.iter().map(|&p| p as f64)).map(round0),
                min_package: packages.iter().min().copied(),
                max_package: packages.iter().max().copied(),
                avg_interview_score: round1(
                    mean(
                        members
                            .iter()
                            .map(|j| f64::from(j.placement.mock_interview_score)),
                    )
                    .unwrap_or(0.0),
                ),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        cmp_f64_desc(a.placement_rate, b.placement_rate)
            .then_with(|| cmp_opt_desc(&a.avg_package, &b.avg_package))
    });
    Ok(rows)
}

fn location_success_table(rows: &[LocationSuccessRow]) -> Table {
    let mut table = Table::new(vec![
        "city",
        "total_students",
        "placed_students",
        "placement_rate_percent",
        "avg_package",
        "min_package",
        "max_package",
        "avg_interview_score",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.city),
            Value::Integer(row.total_students as i64),
            Value::Integer(row.placed_students as i64),
            Value::Float(row.placement_rate),
            Value::opt_float(row.avg_package),
            Value::opt_integer(row.min_package.map(|p| p as i64)),
            Value::opt_integer(row.max_package.map(|p| p as i64)),
            Value::Float(row.avg_interview_score),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 5. Company-wise hiring
// ---------------------------------------------------------------------

/// Hiring pattern of one company over its placed students.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyHiringRow {
    pub company_name: String,
    pub students_hired: usize,
    pub avg_package: Option<f64>,
    pub min_package: Option<u64>,
    pub max_package: Option<u64>,
    pub avg_interview_score: f64,
    pub avg_rounds_cleared: f64,
    pub avg_soft_skills: f64,
}

/// Hires and package statistics per company, placed students only.
/// Sorted by hire count, then average package, descending.
pub fn company_hiring(store: &StudentStore) -> Result<Vec<CompanyHiringRow>> {
    let joined = join_all(store)?;

    let mut groups: BTreeMap<&str, Vec<&JoinedStudent<'_>>> = BTreeMap::new();
    for j in &joined {
        if j.placement.status != PlacementStatus::Placed {
            continue;
        }
        if let Some(ref company) = j.placement.company_name {
            groups.entry(company.as_str()).or_default().push(j);
        }
    }

    let mut rows: Vec<CompanyHiringRow> = groups
        .iter()
        .map(|(company, hires)| {
            let packages: Vec<u64> =
                hires.iter().filter_map(|j| j.placement.package_amount).collect();
            CompanyHiringRow {
                company_name: (*company).to_string(),
                students_hired: hires.len(),
                avg_package: mean(packages.iter().map(|&p| p as f64)).map(round0),
                min_package: packages.iter().min().copied(),
                max_package: packages.iter().max().copied(),
                avg_interview_score: round1(
                    mean(
                        hires
                            .iter()
                            .map(|j| f64::from(j.placement.mock_interview_score)),
                    )
                    .unwrap_or(0.0),
                ),
                avg_rounds_cleared: round1(
                    mean(
                        hires
                            .iter()
                            .map(|j| f64::from(j.placement.interview_rounds_cleared)),
                    )
                    .unwrap_or(0.0),
                ),
                avg_soft_skills: round1(
                    mean(hires.iter().map(|j| j.soft_skills_average())).unwrap_or(0.0),
                ),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.students_hired
            .cmp(&a.students_hired)
            .then_with(|| cmp_opt_desc(&a.avg_package, &b.avg_package))
    });
    Ok(rows)
}

fn company_hiring_table(rows: &[CompanyHiringRow]) -> Table {
    let mut table = Table::new(vec![
        "company_name",
        "students_hired",
        "avg_package",
        "min_package",
        "max_package",
        "avg_interview_score",
        "avg_rounds_cleared",
        "avg_soft_skills",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.company_name),
            Value::Integer(row.students_hired as i64),
            Value::opt_float(row.avg_package),
            Value::opt_integer(row.min_package.map(|p| p as i64)),
            Value::opt_integer(row.max_package.map(|p| p as i64)),
            Value::Float(row.avg_interview_score),
            Value::Float(row.avg_rounds_cleared),
            Value::Float(row.avg_soft_skills),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 6. Programming-language impact
// ---------------------------------------------------------------------

/// Placement impact of one programming language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageImpactRow {
    pub language: String,
    pub total_students: usize,
    pub placed_students: usize,
    pub placement_rate: f64,
    pub avg_problems_solved: f64,
    pub avg_project_score: f64,
    pub avg_package_placed: Option<f64>,
}

/// Placement rate and averages per programming language, over the students
/// who attempted that language. Sorted by placement rate, then average
/// package of placed, descending.
pub fn language_impact(store: &StudentStore) -> Result<Vec<LanguageImpactRow>> {
    let joined = join_all(store)?;

    struct Accum {
        students: usize,
        placed: usize,
        problems: Vec<f64>,
        projects: Vec<f64>,
        packages: Vec<f64>,
    }

    let mut groups: BTreeMap<&str, Accum> = BTreeMap::new();
    for j in &joined {
        // One programming record per (student, language), so each student
        // counts once within a language group.
        for record in &j.programming {
            let accum = groups.entry(record.language.as_str()).or_insert(Accum {
                students: 0,
                placed: 0,
                problems: Vec::new(),
                projects: Vec::new(),
                packages: Vec::new(),
            });
            accum.students += 1;
            accum.problems.push(f64::from(record.problems_solved));
            accum.projects.push(f64::from(record.latest_project_score));
            if j.placement.status == PlacementStatus::Placed {
                accum.placed += 1;
                if let Some(package) = j.placement.package_amount {
                    accum.packages.push(package as f64);
                }
            }
        }
    }

    let mut rows: Vec<LanguageImpactRow> = groups
        .iter()
        .map(|(language, accum)| LanguageImpactRow {
            language: (*language).to_string(),
            total_students: accum.students,
            placed_students: accum.placed,
            placement_rate: round1(percent(accum.placed, accum.students)),
            avg_problems_solved: round1(mean(accum.problems.iter().copied()).unwrap_or(0.0)),
            avg_project_score: round1(mean(accum.projects.iter().copied()).unwrap_or(0.0)),
            avg_package_placed: mean(accum.packages.iter().copied()).map(round0),
        })
        .collect();

    rows.sort_by(|a, b| {
        cmp_f64_desc(a.placement_rate, b.placement_rate)
            .then_with(|| cmp_opt_desc(&a.avg_package_placed, &b.avg_package_placed))
    });
    Ok(rows)
}

fn language_impact_table(rows: &[LanguageImpactRow]) -> Table {
    let mut table = Table::new(vec![
        "language",
        "total_students",
        "placed_students",
        "placement_rate_percent",
        "avg_problems_solved",
        "avg_project_score",
        "avg_package_for_placed",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.language),
            Value::Integer(row.total_students as i64),
            Value::Integer(row.placed_students as i64),
            Value::Float(row.placement_rate),
            Value::Float(row.avg_problems_solved),
            Value::Float(row.avg_project_score),
            Value::opt_float(row.avg_package_placed),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 7. Internship impact
// ---------------------------------------------------------------------

/// Placement outcomes for students with a given internship count.
#[derive(Debug, Clone, PartialEq)]
pub struct InternshipImpactRow {
    pub internships_completed: u32,
    pub student_count: usize,
    pub placed_count: usize,
    pub placement_rate: f64,
    pub avg_interview_score: f64,
    pub avg_package_placed: Option<f64>,
    pub avg_soft_skills: f64,
}

/// Correlation between internships completed and placement outcomes,
/// sorted ascending by internship count.
pub fn internship_impact(store: &StudentStore) -> Result<Vec<InternshipImpactRow>> {
    let joined = join_all(store)?;

    let mut groups: BTreeMap<u32, Vec<&JoinedStudent<'_>>> = BTreeMap::new();
    for j in &joined {
        groups
            .entry(j.placement.internships_completed)
            .or_default()
            .push(j);
    }

    // BTreeMap iteration already yields ascending internship counts.
    let rows = groups
        .iter()
        .map(|(&internships, members)| {
            let placed: Vec<_> = members
                .iter()
                .filter(|j| j.placement.status == PlacementStatus::Placed)
                .collect();
            InternshipImpactRow {
                internships_completed: internships,
                student_count: members.len(),
                placed_count: placed.len(),
                placement_rate: round1(percent(placed.len(), members.len())),
                avg_interview_score: round1(
                    mean(
                        members
                            .iter()
                            .map(|j| f64::from(j.placement.mock_interview_score)),
                    )
                    .unwrap_or(0.0),
                ),
                avg_package_placed: mean(
                    placed
                        .iter()
                        .filter_map(|j| j.placement.package_amount)
                        .map(|p| p as f64),
                )
                .map(round0),
                avg_soft_skills: round1(
                    mean(members.iter().map(|j| j.soft_skills_average())).unwrap_or(0.0),
                ),
            }
        })
        .collect();
    Ok(rows)
}

fn internship_impact_table(rows: &[InternshipImpactRow]) -> Table {
    let mut table = Table::new(vec![
        "internships_completed",
        "student_count",
        "placed_count",
        "placement_rate_percent",
        "avg_interview_score",
        "avg_package",
        "avg_soft_skills",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::Integer(i64::from(row.internships_completed)),
            Value::Integer(row.student_count as i64),
            Value::Integer(row.placed_count as i64),
            Value::Float(row.placement_rate),
            Value::Float(row.avg_interview_score),
            Value::opt_float(row.avg_package_placed),
            Value::Float(row.avg_soft_skills),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 8. Students needing improvement
// ---------------------------------------------------------------------

/// The primary area a not-yet-ready student should focus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprovementArea {
    InterviewSkills,
    ProgrammingPractice,
    SoftSkills,
    PracticalExperience,
    GeneralImprovement,
}

impl ImprovementArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImprovementArea::InterviewSkills => "Interview Skills",
            ImprovementArea::ProgrammingPractice => "Programming Practice",
            ImprovementArea::SoftSkills => "Soft Skills",
            ImprovementArea::PracticalExperience => "Practical Experience",
            ImprovementArea::GeneralImprovement => "General Improvement",
        }
    }
}

/// First matching rule wins; exactly one area per student.
fn improvement_area(
    interview_score: u32,
    max_problems_solved: Option<u32>,
    soft_skills_avg: f64,
    internships: u32,
) -> ImprovementArea {
    if interview_score < 50 {
        ImprovementArea::InterviewSkills
    } else if max_problems_solved.is_some_and(|max| max < 30) {
        ImprovementArea::ProgrammingPractice
    } else if soft_skills_avg < 60.0 {
        ImprovementArea::SoftSkills
    } else if internships == 0 {
        ImprovementArea::PracticalExperience
    } else {
        ImprovementArea::GeneralImprovement
    }
}

/// One at-risk student with their primary improvement area.
#[derive(Debug, Clone, PartialEq)]
pub struct ImprovementRow {
    pub name: String,
    pub course_batch: String,
    pub city: String,
    pub status: PlacementStatus,
    pub mock_interview_score: u32,
    pub internships_completed: u32,
    pub avg_soft_skills: f64,
    pub max_problems_solved: Option<u32>,
    pub best_project_score: Option<u32>,
    pub improvement_area: ImprovementArea,
}

/// Students with status Not Ready or In Progress, each tagged with one
/// primary improvement area. Sorted In Progress before Not Ready, then
/// interview score ascending; ties keep stored order.
pub fn improvement_needed(store: &StudentStore) -> Result<Vec<ImprovementRow>> {
    let joined = join_all(store)?;

    let mut rows: Vec<ImprovementRow> = joined
        .iter()
        .filter(|j| {
            matches!(
                j.placement.status,
                PlacementStatus::NotReady | PlacementStatus::InProgress
            )
        })
        .map(|j| {
            let soft_avg = j.soft_skills_average();
            let max_problems = j.max_problems_solved();
            ImprovementRow {
                name: j.student.name.clone(),
                course_batch: j.student.course_batch.clone(),
                city: j.student.city.clone(),
                status: j.placement.status,
                mock_interview_score: j.placement.mock_interview_score,
                internships_completed: j.placement.internships_completed,
                avg_soft_skills: round1(soft_avg),
                max_problems_solved: max_problems,
                best_project_score: j.best_project_score(),
                improvement_area: improvement_area(
                    j.placement.mock_interview_score,
                    max_problems,
                    soft_avg,
                    j.placement.internships_completed,
                ),
            }
        })
        .collect();

    let status_rank = |status: PlacementStatus| match status {
        PlacementStatus::InProgress => 0,
        _ => 1,
    };
    rows.sort_by(|a, b| {
        status_rank(a.status)
            .cmp(&status_rank(b.status))
            .then_with(|| a.mock_interview_score.cmp(&b.mock_interview_score))
    });
    Ok(rows)
}

fn improvement_needed_table(rows: &[ImprovementRow]) -> Table {
    let mut table = Table::new(vec![
        "name",
        "course_batch",
        "city",
        "placement_status",
        "mock_interview_score",
        "internships_completed",
        "avg_soft_skills",
        "max_problems_solved",
        "best_project_score",
        "primary_improvement_area",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(&row.name),
            Value::text(&row.course_batch),
            Value::text(&row.city),
            Value::text(row.status.as_str()),
            Value::Integer(i64::from(row.mock_interview_score)),
            Value::Integer(i64::from(row.internships_completed)),
            Value::Float(row.avg_soft_skills),
            Value::opt_integer(row.max_problems_solved.map(i64::from)),
            Value::opt_integer(row.best_project_score.map(i64::from)),
            Value::text(row.improvement_area.as_str()),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 9. Skills gap by package tier
// ---------------------------------------------------------------------

/// Compensation bucket of a placed student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PackageTier {
    High,
    Medium,
    Entry,
}

impl PackageTier {
    /// Bucket a package amount. 1,000,000 and above is High; 500,000 and
    /// above is Medium; everything below is Entry.
    pub fn of(package_amount: u64) -> Self {
        if package_amount >= 1_000_000 {
            PackageTier::High
        } else if package_amount >= 500_000 {
            PackageTier::Medium
        } else {
            PackageTier::Entry
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PackageTier::High => "High (10L+)",
            PackageTier::Medium => "Medium (5-10L)",
            PackageTier::Entry => "Entry (<5L)",
        }
    }
}

/// Skill and programming averages over one package tier.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillsGapRow {
    pub tier: PackageTier,
    pub student_count: usize,
    pub avg_interview_score: f64,
    pub avg_communication: f64,
    pub avg_teamwork: f64,
    pub avg_presentation: f64,
    pub avg_leadership: f64,
    pub avg_critical_thinking: f64,
    pub avg_interpersonal: f64,
    pub avg_problems_solved: Option<f64>,
    pub avg_project_score: Option<f64>,
    pub avg_rounds_cleared: f64,
}

/// Averages of all skill dimensions and programming metrics per package
/// tier, placed students only, in fixed tier order High, Medium, Entry.
/// Empty tiers are omitted.
pub fn skills_gap(store: &StudentStore) -> Result<Vec<SkillsGapRow>> {
    let joined = join_all(store)?;

    let mut groups: BTreeMap<PackageTier, Vec<&JoinedStudent<'_>>> = BTreeMap::new();
    for j in &joined {
        if j.placement.status != PlacementStatus::Placed {
            continue;
        }
        if let Some(package) = j.placement.package_amount {
            groups.entry(PackageTier::of(package)).or_default().push(j);
        }
    }

    let skill_avg = |members: &[&JoinedStudent<'_>], f: fn(&JoinedStudent<'_>) -> u32| -> f64 {
        round1(mean(members.iter().map(|j| f64::from(f(j)))).unwrap_or(0.0))
    };

    // Tier enum order is the fixed output order High, Medium, Entry.
    let rows = groups
        .iter()
        .map(|(&tier, members)| {
            let records: Vec<_> = members
                .iter()
                .flat_map(|j| j.programming.iter().copied())
                .collect();
            SkillsGapRow {
                tier,
                student_count: members.len(),
                avg_interview_score: skill_avg(members, |j| j.placement.mock_interview_score),
                avg_communication: skill_avg(members, |j| j.soft_skills.communication),
                avg_teamwork: skill_avg(members, |j| j.soft_skills.teamwork),
                avg_presentation: skill_avg(members, |j| j.soft_skills.presentation),
                avg_leadership: skill_avg(members, |j| j.soft_skills.leadership),
                avg_critical_thinking: skill_avg(members, |j| j.soft_skills.critical_thinking),
                avg_interpersonal: skill_avg(members, |j| j.soft_skills.interpersonal_skills),
                avg_problems_solved: mean(
                    records.iter().map(|r| f64::from(r.problems_solved)),
                )
                .map(round1),
                avg_project_score: mean(
                    records.iter().map(|r| f64::from(r.latest_project_score)),
                )
                .map(round1),
                avg_rounds_cleared: skill_avg(members, |j| j.placement.interview_rounds_cleared),
            }
        })
        .collect();
    Ok(rows)
}

fn skills_gap_table(rows: &[SkillsGapRow]) -> Table {
    let mut table = Table::new(vec![
        "package_category",
        "student_count",
        "avg_interview_score",
        "avg_communication",
        "avg_teamwork",
        "avg_presentation",
        "avg_leadership",
        "avg_critical_thinking",
        "avg_interpersonal",
        "avg_problems_solved",
        "avg_project_score",
        "avg_rounds_cleared",
    ]);
    for row in rows {
        table.push_row(vec![
            Value::text(row.tier.label()),
            Value::Integer(row.student_count as i64),
            Value::Float(row.avg_interview_score),
            Value::Float(row.avg_communication),
            Value::Float(row.avg_teamwork),
            Value::Float(row.avg_presentation),
            Value::Float(row.avg_leadership),
            Value::Float(row.avg_critical_thinking),
            Value::Float(row.avg_interpersonal),
            Value::opt_float(row.avg_problems_solved),
            Value::opt_float(row.avg_project_score),
            Value::Float(row.avg_rounds_cleared),
        ]);
    }
    table
}

// ---------------------------------------------------------------------
// 10. Overall program effectiveness
// ---------------------------------------------------------------------

/// Whole-program aggregate statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramOverview {
    pub total_students: usize,
    pub placed_students: usize,
    pub placement_rate: f64,
    pub avg_package: Option<f64>,
    pub avg_interview_score: Option<f64>,
    pub avg_soft_skills: Option<f64>,
    pub avg_problems_solved: Option<f64>,
    pub avg_project_score: Option<f64>,
    pub hiring_companies: usize,
}

/// Three-part executive summary: the whole-program aggregate row, the
/// best-performing batch by placement rate, and the top hiring company by
/// placed count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramEffectiveness {
    pub overall: ProgramOverview,
    pub best_batch: Option<String>,
    pub top_company: Option<String>,
}

/// Executive program summary. Rate ties between batches and hire-count
/// ties between companies break by name ascending, so the output is
/// deterministic.
pub fn program_effectiveness(store: &StudentStore) -> Result<ProgramEffectiveness> {
    let joined = join_all(store)?;

    let placed: Vec<_> = joined
        .iter()
        .filter(|j| j.placement.status == PlacementStatus::Placed)
        .collect();
    let records: Vec<_> = joined
        .iter()
        .flat_map(|j| j.programming.iter().copied())
        .collect();

    let mut companies: Vec<&str> = placed
        .iter()
        .filter_map(|j| j.placement.company_name.as_deref())
        .collect();
    companies.sort_unstable();
    companies.dedup();

    let overall = ProgramOverview {
        total_students: joined.len(),
        placed_students: placed.len(),
        placement_rate: round1(percent(placed.len(), joined.len())),
        avg_package: mean(
            placed
                .iter()
                .filter_map(|j| j.placement.package_amount)
                .map(|p| p as f64),
        )
        .map(round0),
        avg_interview_score: mean(
            joined
                .iter()
                .map(|j| f64::from(j.placement.mock_interview_score)),
        )
        .map(round1),
        avg_soft_skills: mean(joined.iter().map(|j| j.soft_skills_average())).map(round1),
        avg_problems_solved: mean(records.iter().map(|r| f64::from(r.problems_solved)))
            .map(round1),
        avg_project_score: mean(records.iter().map(|r| f64::from(r.latest_project_score)))
            .map(round1),
        hiring_companies: companies.len(),
    };

    // Best batch by placement rate; alphabetical iteration makes the
    // strictly-greater comparison break ties by batch name ascending.
    let mut batches: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for j in &joined {
        let entry = batches.entry(j.student.course_batch.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if j.placement.status == PlacementStatus::Placed {
            entry.1 += 1;
        }
    }
    let mut best_batch: Option<(&str, f64)> = None;
    for (batch, (total, placed_count)) in &batches {
        let rate = percent(*placed_count, *total);
        if best_batch.map_or(true, |(_, best)| rate > best) {
            best_batch = Some((batch, rate));
        }
    }

    let mut hires: BTreeMap<&str, usize> = BTreeMap::new();
    for j in &placed {
        if let Some(company) = j.placement.company_name.as_deref() {
            *hires.entry(company).or_insert(0) += 1;
        }
    }
    let mut top_company: Option<(&str, usize)> = None;
    for (company, count) in &hires {
        if top_company.map_or(true, |(_, best)| *count > best) {
            top_company = Some((company, *count));
        }
    }

    Ok(ProgramEffectiveness {
        overall,
        best_batch: best_batch.map(|(name, _)| name.to_string()),
        top_company: top_company.map(|(name, _)| name.to_string()),
    })
}

fn program_effectiveness_table(summary: &ProgramEffectiveness) -> Table {
    let mut table = Table::new(vec![
        "metric_category",
        "total_students",
        "placed_students",
        "overall_placement_rate",
        "avg_package",
        "avg_interview_score",
        "avg_soft_skills",
        "avg_problems_solved",
        "avg_project_score",
        "hiring_companies",
        "highlight",
    ]);

    let overall = &summary.overall;
    table.push_row(vec![
        Value::text("Overall Program Performance"),
        Value::Integer(overall.total_students as i64),
        Value::Integer(overall.placed_students as i64),
        Value::Float(overall.placement_rate),
        Value::opt_float(overall.avg_package),
        Value::opt_float(overall.avg_interview_score),
        Value::opt_float(overall.avg_soft_skills),
        Value::opt_float(overall.avg_problems_solved),
        Value::opt_float(overall.avg_project_score),
        Value::Integer(overall.hiring_companies as i64),
        Value::Null,
    ]);

    let highlight_row = |category: &str, highlight: &Option<String>| {
        vec![
            Value::text(category),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::opt_text(highlight.as_deref()),
        ]
    };
    table.push_row(highlight_row("Best Performing Batch", &summary.best_batch));
    table.push_row(highlight_row("Top Hiring Company", &summary.top_company));

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_names_round_trip() {
        for query in InsightQuery::ALL {
            assert_eq!(query.name().parse::<InsightQuery>().unwrap(), query);
        }
    }

    #[test]
    fn test_unknown_query_name() {
        let err = "most_popular_city".parse::<InsightQuery>().unwrap_err();
        assert!(matches!(err, Error::UnknownQuery(_)));
    }

    #[test]
    fn test_package_tier_boundaries() {
        assert_eq!(PackageTier::of(1_000_000), PackageTier::High);
        assert_eq!(PackageTier::of(999_999), PackageTier::Medium);
        assert_eq!(PackageTier::of(500_000), PackageTier::Medium);
        assert_eq!(PackageTier::of(499_999), PackageTier::Entry);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(PackageTier::High.label(), "High (10L+)");
        assert_eq!(PackageTier::Medium.label(), "Medium (5-10L)");
        assert_eq!(PackageTier::Entry.label(), "Entry (<5L)");
    }

    #[test]
    fn test_improvement_area_priority() {
        // Interview rule wins regardless of other fields
        assert_eq!(
            improvement_area(45, Some(50), 80.0, 2),
            ImprovementArea::InterviewSkills
        );
        assert_eq!(
            improvement_area(60, Some(10), 80.0, 2),
            ImprovementArea::ProgrammingPractice
        );
        assert_eq!(
            improvement_area(60, Some(50), 55.0, 2),
            ImprovementArea::SoftSkills
        );
        assert_eq!(
            improvement_area(60, Some(50), 80.0, 0),
            ImprovementArea::PracticalExperience
        );
        assert_eq!(
            improvement_area(60, Some(50), 80.0, 2),
            ImprovementArea::GeneralImprovement
        );
        // No programming records: the problems rule does not match
        assert_eq!(
            improvement_area(60, None, 55.0, 2),
            ImprovementArea::SoftSkills
        );
    }
}
