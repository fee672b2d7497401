//! Final-grade computation and cohort partitioning.
//!
//! This module joins the roster against the typed score sheets, applies the
//! fixed weighted formula, and routes each result into one of three cohorts.

pub mod cohort;
pub mod grade;
pub mod joiner;
pub mod scores;
pub mod stats;
pub mod types;

pub use cohort::{CohortGroup, CohortResults};
pub use grade::compute_final_grade;
pub use joiner::{SourceTables, join_roster};
pub use types::GradeResult;
