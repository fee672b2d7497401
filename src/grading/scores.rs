//! Typed views over score-sheet rows.

use tracing::warn;

use crate::error::{GradeError, Result};
use crate::table::TypedRecord;

pub const HOMEWORK_1: &str = "Homework 1";
pub const HOMEWORK_2: &str = "Homework 2";
pub const EXAM: &str = "Exam";
pub const QUIZ_GRADE: &str = "Grade";

/// Columns read from the homework and exam sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeworkScores {
    pub homework_1: f64,
    pub homework_2: f64,
    pub exam: f64,
}

impl HomeworkScores {
    pub fn from_record(record: &TypedRecord) -> Result<Self> {
        Ok(Self {
            homework_1: numeric(record, HOMEWORK_1)?,
            homework_2: numeric(record, HOMEWORK_2)?,
            exam: numeric(record, EXAM)?,
        })
    }

    /// Homework points fed to the final grade: `Homework 1 + Homework 2 + Homework 1`.
    pub fn homework_total(&self) -> f64 {
        self.homework_1 + self.homework_2 + self.homework_1
    }
}

/// The `Grade` column of a quiz sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizScore {
    pub grade: f64,
}

impl QuizScore {
    pub fn from_record(record: &TypedRecord) -> Result<Self> {
        Ok(Self {
            grade: numeric(record, QUIZ_GRADE)?,
        })
    }
}

/// Reads a numeric cell. Missing columns and text cells (including empty
/// ones) are schema errors.
fn numeric(record: &TypedRecord, column: &str) -> Result<f64> {
    let value = record
        .get(column)
        .ok_or_else(|| GradeError::MissingField {
            field: column.to_string(),
            record: record.to_string(),
        })?;

    let number = value.as_f64().ok_or_else(|| GradeError::InvalidField {
        field: column.to_string(),
        value: value.to_string(),
        record: record.to_string(),
    })?;

    if number < 0.0 {
        warn!(column, value = number, "Negative score accepted as-is");
    }

    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::table::FieldValue;

    fn record(cells: &[(&str, &str)]) -> TypedRecord {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::infer(v)))
            .collect()
    }

    #[test]
    fn test_homework_total_counts_first_homework_twice() {
        let rec = record(&[("Homework 1", "10"), ("Homework 2", "7"), ("Exam", "80")]);
        let scores = HomeworkScores::from_record(&rec).unwrap();

        assert_eq!(scores.homework_total(), 27.0);
        assert_eq!(scores.exam, 80.0);
    }

    #[test]
    fn test_mixed_int_and_float_cells() {
        let rec = record(&[("Homework 1", "9.5"), ("Homework 2", "10"), ("Exam", "88.25")]);
        let scores = HomeworkScores::from_record(&rec).unwrap();

        assert_eq!(scores.homework_total(), 29.0);
        assert_eq!(scores.exam, 88.25);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let rec = record(&[("Homework 1", "10"), ("Exam", "80")]);
        let err = HomeworkScores::from_record(&rec).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("Homework 2"));
    }

    #[test]
    fn test_empty_cell_is_not_zero() {
        let rec = record(&[("Grade", "")]);
        let err = QuizScore::from_record(&rec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_quiz_grade() {
        let rec = record(&[("SID", "abc"), ("Grade", "20")]);
        assert_eq!(QuizScore::from_record(&rec).unwrap().grade, 20.0);
    }
}
