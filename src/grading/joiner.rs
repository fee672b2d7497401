//! Joins the roster against the score sheets.

use tracing::{debug, info};

use crate::error::{GradeError, Result};
use crate::grading::cohort::{CohortGroup, CohortResults};
use crate::grading::grade::checked_final_grade;
use crate::grading::scores::{HomeworkScores, QuizScore};
use crate::grading::types::GradeResult;
use crate::roster::StudentIdentity;
use crate::table::Table;

/// The three score sheets, each keyed by lowercase NetID.
#[derive(Debug, Clone, Copy)]
pub struct SourceTables<'a> {
    pub homework: &'a Table,
    pub quiz_1: &'a Table,
    pub quiz_2: &'a Table,
}

/// Grades one student.
///
/// Lookups go homework sheet, quiz 1, quiz 2; the first missing key aborts.
pub fn grade_student(student: &StudentIdentity, tables: SourceTables<'_>) -> Result<GradeResult> {
    let net_id = student
        .net_id
        .as_deref()
        .ok_or_else(|| GradeError::MissingField {
            field: "NetID".to_string(),
            record: student.to_string(),
        })?;
    let key = net_id.to_lowercase();

    let homework = HomeworkScores::from_record(tables.homework.require(&key)?)?;
    let quiz_1 = QuizScore::from_record(tables.quiz_1.require(&key)?)?;
    let quiz_2 = QuizScore::from_record(tables.quiz_2.require(&key)?)?;

    let homework_total = homework.homework_total();
    let quiz_total = quiz_1.grade + quiz_2.grade;
    let final_grade =
        checked_final_grade(homework_total, homework.exam, quiz_total).map_err(|value| {
            GradeError::UnrepresentableGrade {
                value: value.to_string(),
                record: student.to_string(),
            }
        })?;

    debug!(
        net_id = %key,
        homework_total,
        exam = homework.exam,
        quiz_total,
        final_grade,
        "Student graded"
    );

    Ok(GradeResult {
        student_name: student.name.clone(),
        id_number: student.id.clone(),
        final_grade,
    })
}

/// Grades every student and routes the results into cohorts.
///
/// # Errors
///
/// Schema errors for a missing NetID or unusable score cell, lookup errors
/// for a NetID absent from any sheet. Nothing is skipped.
#[tracing::instrument(skip_all, fields(students = students.len()))]
pub fn join_roster(
    students: &[StudentIdentity],
    tables: SourceTables<'_>,
) -> Result<CohortResults> {
    let mut results = CohortResults::new();

    for student in students {
        let result = grade_student(student, tables)?;
        let group = CohortGroup::classify(student.group.as_ref());
        results.push(group, result);
    }

    for (group, rows) in results.iter() {
        info!(group = %group, students = rows.len(), "Cohort assembled");
    }

    Ok(results)
}
