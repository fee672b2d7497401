//! Data types produced by the grading pipeline.

use serde::Serialize;

use crate::roster::StudentId;

/// One student's final grade, as written to a group report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    #[serde(rename = "Student Name")]
    pub student_name: String,
    #[serde(rename = "ID Number", serialize_with = "serialize_id")]
    pub id_number: StudentId,
    #[serde(rename = "Final Grade")]
    pub final_grade: i64,
}

impl GradeResult {
    pub fn new(student_name: &str, id_number: impl Into<StudentId>, final_grade: i64) -> Self {
        Self {
            student_name: student_name.to_string(),
            id_number: id_number.into(),
            final_grade,
        }
    }
}

/// Reports render the ID as plain text regardless of its JSON type.
fn serialize_id<S: serde::Serializer>(id: &StudentId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}
