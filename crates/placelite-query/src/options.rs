//! Distinct-value enumeration for populating criteria pickers, plus the
//! dataset summary shown before any query runs.

use crate::stats::{mean, round1};
use placelite_core::{PlacementStatus, Result};
use placelite_store::StudentStore;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct values available for each filterable field, each sorted
/// ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub course_batches: Vec<String>,
    pub cities: Vec<String>,
    pub programming_languages: Vec<String>,
    pub placement_statuses: Vec<String>,
    pub companies: Vec<String>,
}

/// Enumerate the distinct values of every filterable field.
pub fn filter_options(store: &StudentStore) -> Result<FilterOptions> {
    let mut batches = BTreeSet::new();
    let mut cities = BTreeSet::new();
    for student in store.students() {
        batches.insert(student.course_batch.clone());
        cities.insert(student.city.clone());
    }

    let mut languages = BTreeSet::new();
    for record in store.programming() {
        languages.insert(record.language.clone());
    }

    let mut statuses = BTreeSet::new();
    let mut companies = BTreeSet::new();
    for placement in store.placements() {
        statuses.insert(placement.status);
        if let Some(ref company) = placement.company_name {
            companies.insert(company.clone());
        }
    }

    Ok(FilterOptions {
        course_batches: batches.into_iter().collect(),
        cities: cities.into_iter().collect(),
        programming_languages: languages.into_iter().collect(),
        placement_statuses: statuses.iter().map(|s| s.as_str().to_string()).collect(),
        companies: companies.into_iter().collect(),
    })
}

/// Headline counts and averages over the whole dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_students: usize,
    pub programming_records: usize,
    /// Student count per placement status label.
    pub placement_distribution: BTreeMap<String, usize>,
    pub avg_problems_solved: Option<f64>,
    pub avg_project_score: Option<f64>,
}

/// Compute the dataset summary.
pub fn summary(store: &StudentStore) -> Result<Summary> {
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    for status in PlacementStatus::ALL {
        let count = store.count_with_status(status);
        if count > 0 {
            distribution.insert(status.as_str().to_string(), count);
        }
    }

    Ok(Summary {
        total_students: store.students().len(),
        programming_records: store.programming().len(),
        placement_distribution: distribution,
        avg_problems_solved: mean(
            store
                .programming()
                .iter()
                .map(|r| f64::from(r.problems_solved)),
        )
        .map(round1),
        avg_project_score: mean(
            store
                .programming()
                .iter()
                .map(|r| f64::from(r.latest_project_score)),
        )
        .map(round1),
    })
}
