/// Percent of the raw homework sum counted toward the final grade.
pub const HOMEWORK_WEIGHT: f64 = 10.0;
/// Percent of the raw exam score counted toward the final grade.
pub const EXAM_WEIGHT: f64 = 65.0;
/// Percent of the raw quiz sum counted toward the final grade.
pub const QUIZ_WEIGHT: f64 = 25.0;

/// Combines raw totals into the final integer grade.
///
/// | Component | Weight |
/// |-----------|--------|
/// | homework  | 10%    |
/// | exam      | 65%    |
/// | quizzes   | 25%    |
///
/// The weighted sum is rounded half-to-even, so a total of exactly 2.5
/// becomes 2 and 3.5 becomes 4. Inputs are not range-checked; a sum outside
/// the `i64` range saturates, see [`checked_final_grade`].
pub fn compute_final_grade(total_homework: f64, exam: f64, total_quizzes: f64) -> i64 {
    weighted_score(total_homework, exam, total_quizzes).round_ties_even() as i64
}

/// Like [`compute_final_grade`], but `Err` carries the rounded sum when it is
/// NaN, infinite, or outside the `i64` range.
pub fn checked_final_grade(
    total_homework: f64,
    exam: f64,
    total_quizzes: f64,
) -> Result<i64, f64> {
    let rounded = weighted_score(total_homework, exam, total_quizzes).round_ties_even();

    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Ok(rounded as i64)
    } else {
        Err(rounded)
    }
}

/// Unrounded weighted sum of the three components.
pub fn weighted_score(total_homework: f64, exam: f64, total_quizzes: f64) -> f64 {
    let homework_score = total_homework * HOMEWORK_WEIGHT * 0.01;
    let exam_score = exam * EXAM_WEIGHT * 0.01;
    let quiz_score = total_quizzes * QUIZ_WEIGHT * 0.01;

    homework_score + exam_score + quiz_score
}
