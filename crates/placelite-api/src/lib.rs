//! # Placelite
//!
//! An embedded placement-readiness analytics engine. Four related tables
//! (students, programming records, soft-skills profiles, placement
//! records) are loaded into an immutable in-memory store and queried two
//! ways: a criteria-to-query compiler for eligibility filtering, and a
//! fixed catalogue of ten aggregate insight queries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use placelite::{EligibilityCriteria, PlacementDb, PlacementStatus};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = PlacementDb::open("./placement_data")?;
//!
//!     // Every criterion is optional; supplied ones combine with AND.
//!     let criteria = EligibilityCriteria::new()
//!         .with_min_problems_solved(50)
//!         .with_language("Python")
//!         .with_statuses([PlacementStatus::Ready, PlacementStatus::Placed]);
//!
//!     let eligible = db.find_eligible(&criteria);
//!     println!("{} students match", eligible.len());
//!
//!     // The fixed insight catalogue is addressed by name.
//!     let top = db.run_insight_query("top_ready_students", Some(5));
//!     for row in &top.rows {
//!         println!("{:?}", row);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Query methods never panic and never return `Err`: a failed query is
//! logged and rendered as an empty table, so callers distinguish "no
//! matches" from "engine down" via [`PlacementDb::test_connection`].

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

pub mod logging;

// Re-export core types
pub use placelite_core::{
    Error, PlacementRecord, PlacementStatus, ProgrammingRecord, Result, SoftSkillsProfile,
    Student, Table, Value,
};

// Store components
pub use placelite_store::{
    Dataset, StudentStore, PLACEMENTS_FILE, PROGRAMMING_FILE, REQUIRED_TABLES, SOFT_SKILLS_FILE,
    STUDENTS_FILE,
};

// Query components
pub use placelite_query::{
    EligibilityCriteria, EligibleStudent, FilterOptions, InsightQuery, Summary,
    DEFAULT_TOP_LIMIT,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main engine handle.
///
/// Thread-safe and cheap to clone; all clones share one immutable store.
#[derive(Clone, Debug)]
pub struct PlacementDb {
    store: Arc<StudentStore>,
}

impl PlacementDb {
    /// Opens the engine over a dataset directory containing the four
    /// table files. Fails with a connectivity error when a table file is
    /// missing or corrupt, and with an invariant error when the loaded
    /// data violates the relational guarantees.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = StudentStore::open(path)?;
        store.validate()?;
        info!(students = store.students().len(), "placement engine ready");
        Ok(PlacementDb {
            store: Arc::new(store),
        })
    }

    /// Builds an in-memory engine over an already-assembled dataset.
    /// Validates the same relational invariants as [`PlacementDb::open`].
    pub fn in_memory(dataset: Dataset) -> Result<Self> {
        let store = StudentStore::in_memory(dataset);
        store.validate()?;
        Ok(PlacementDb {
            store: Arc::new(store),
        })
    }

    /// Persists the dataset to a directory as the four table files.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.store.save_to(path)
    }

    /// Health probe: true when the store is loaded and its relational
    /// invariants hold. This is how callers tell an empty query result
    /// from a broken engine.
    pub fn test_connection(&self) -> bool {
        match self.store.validate() {
            Ok(()) => true,
            Err(err) => {
                error!(%err, "connection test failed");
                false
            }
        }
    }

    /// Run the eligibility query. Failures are logged and rendered as an
    /// empty table.
    pub fn find_eligible(&self, criteria: &EligibilityCriteria) -> Table {
        match placelite_query::find_eligible(&self.store, criteria) {
            Ok(rows) => placelite_query::to_table(&rows),
            Err(err) => {
                error!(%err, "eligibility query failed");
                Table::empty()
            }
        }
    }

    /// Run one insight query by name, with an optional row limit. Unknown
    /// names and failed queries are logged and rendered as an empty table.
    pub fn run_insight_query(&self, name: &str, limit: Option<usize>) -> Table {
        let query: InsightQuery = match name.parse() {
            Ok(query) => query,
            Err(err) => {
                error!(%err, "unknown insight query");
                return Table::empty();
            }
        };
        match placelite_query::insights::run(&self.store, query, limit) {
            Ok(table) => table,
            Err(err) => {
                error!(%err, query = name, "insight query failed");
                Table::empty()
            }
        }
    }

    /// Distinct values of every filterable field, for populating criteria
    /// pickers.
    pub fn filter_options(&self) -> FilterOptions {
        match placelite_query::filter_options(&self.store) {
            Ok(options) => options,
            Err(err) => {
                error!(%err, "filter option enumeration failed");
                FilterOptions::default()
            }
        }
    }

    /// Headline counts and averages over the whole dataset.
    pub fn summary(&self) -> Summary {
        match placelite_query::summary(&self.store) {
            Ok(summary) => summary,
            Err(err) => {
                error!(%err, "summary computation failed");
                Summary::default()
            }
        }
    }

    /// Direct access to the underlying store, for callers that need the
    /// raw rows.
    pub fn store(&self) -> &StudentStore {
        &self.store
    }
}
