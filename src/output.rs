//! Report formatting and persistence.
//!
//! Writes one ranked CSV per cohort and a JSON summary of the run.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{GradeError, Result};
use crate::grading::cohort::CohortGroup;
use crate::grading::stats::CohortStats;
use crate::grading::types::GradeResult;

/// Header row of every group report. Rows end in `\r\n`.
pub const REPORT_HEADER: [&str; 3] = ["Student Name", "ID Number", "Final Grade"];

/// Returns the results ordered by final grade, highest first.
///
/// The sort is stable: equal grades keep their input order.
pub fn rank(results: &[GradeResult]) -> Vec<GradeResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.final_grade.cmp(&a.final_grade));
    ranked
}

/// Writes one group's ranked report, replacing any existing file.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// [`GradeError::EmptyGroup`] when `results` is empty; I/O failures are
/// returned as-is with no retry.
#[tracing::instrument(
    skip(results, path),
    fields(path = %path.display(), rows = results.len())
)]
pub fn write_ranked_report(
    group: CohortGroup,
    results: &[GradeResult],
    path: &Path,
) -> Result<usize> {
    if results.is_empty() {
        return Err(GradeError::EmptyGroup {
            group: group.to_string(),
            path: path.to_path_buf(),
        });
    }

    let file = File::create(path).map_err(|e| GradeError::io(path, e))?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(file);

    writer
        .write_record(REPORT_HEADER)
        .map_err(|e| GradeError::csv(path, e))?;

    let ranked = rank(results);
    for result in &ranked {
        writer.serialize(result).map_err(|e| GradeError::csv(path, e))?;
    }
    writer.flush().map_err(|e| GradeError::io(path, e))?;

    debug!(rows = ranked.len(), "Report written");
    Ok(ranked.len())
}

/// One written group report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub group: CohortGroup,
    pub path: PathBuf,
    pub rows: usize,
    pub stats: CohortStats,
}

/// Index of everything a pipeline run produced, stored as `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub students: usize,
    pub groups: Vec<GroupReport>,
}

impl RunSummary {
    pub fn new(groups: Vec<GroupReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            students: groups.iter().map(|g| g.rows).sum(),
            groups,
        }
    }
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &RunSummary) {
    debug!("{:#?}", summary);
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| GradeError::Json {
        path: PathBuf::from("<summary>"),
        source: e,
    })?;
    info!("{}", json);
    Ok(())
}

/// Writes the summary as pretty JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| GradeError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| GradeError::io(path, e))?;

    info!(path = %path.display(), "Run summary written");
    Ok(())
}
