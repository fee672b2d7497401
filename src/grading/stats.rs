use serde::Serialize;

use crate::grading::types::GradeResult;

/// Spread of final grades within one cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CohortStats {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl CohortStats {
    pub fn from_results(results: &[GradeResult]) -> Self {
        let grades: Vec<f64> = results.iter().map(|r| r.final_grade as f64).collect();
        let avg = mean(&grades);

        Self {
            count: results.len(),
            mean: avg,
            stddev: stddev(&grades, avg),
            min: results.iter().map(|r| r.final_grade).min(),
            max: results.iter().map(|r| r.final_grade).max(),
        }
    }
}

/// Arithmetic mean; 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a pre-computed mean; 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}
