//! # Placelite Core
//!
//! Core types for the Placelite placement analytics engine: the domain
//! model, the error taxonomy, and the tabular result representation.

#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod value;

pub use error::{Error, Result};
pub use model::{
    clamp_score, PlacementRecord, PlacementStatus, ProgrammingRecord, SoftSkillsProfile, Student,
    MAX_SCORE,
};
pub use value::{Table, Value};
