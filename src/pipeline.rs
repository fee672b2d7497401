//! One full grading run: load, join, report.

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{GradeError, Result};
use crate::grading::cohort::CohortResults;
use crate::grading::joiner::{SourceTables, join_roster};
use crate::grading::stats::CohortStats;
use crate::output::{GroupReport, RunSummary, write_ranked_report, write_summary};
use crate::roster::load_roster;
use crate::table::Table;

/// Loads the roster and the three score sheets and grades every student.
#[tracing::instrument(skip_all)]
pub fn grade_cohorts(config: &PipelineConfig) -> Result<CohortResults> {
    let students = load_roster(&config.roster_path)?;

    let homework = Table::load(&config.homework_path)?;
    let quiz_1 = Table::load(&config.quiz_1_path)?;
    let quiz_2 = Table::load(&config.quiz_2_path)?;

    join_roster(
        &students,
        SourceTables {
            homework: &homework,
            quiz_1: &quiz_1,
            quiz_2: &quiz_2,
        },
    )
}

/// Runs the whole pipeline and writes one report per cohort plus a summary.
///
/// Groups are written in order; the first failure stops the run, leaving
/// earlier reports in place and later ones unwritten.
#[tracing::instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let cohorts = grade_cohorts(config)?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| GradeError::io(&config.output_dir, e))?;

    let mut reports = Vec::new();
    for (group, results) in cohorts.iter() {
        let path = config.output_dir.join(group.report_file_name());
        let rows = write_ranked_report(group, results, &path)?;
        let stats = CohortStats::from_results(results);

        info!(
            group = %group,
            rows,
            mean = stats.mean,
            path = %path.display(),
            "Group report written"
        );

        reports.push(GroupReport {
            group,
            path,
            rows,
            stats,
        });
    }

    let summary = RunSummary::new(reports);
    write_summary(&config.summary_path(), &summary)?;

    info!(students = summary.students, "Grading run complete");
    Ok(summary)
}
