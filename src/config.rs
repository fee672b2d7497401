//! Input and output locations for one pipeline run.

use std::path::{Path, PathBuf};

pub const ROSTER_FILE: &str = "students.json";
pub const HOMEWORK_FILE: &str = "homework_and_exams.csv";
pub const QUIZ_1_FILE: &str = "quiz_1_grades.csv";
pub const QUIZ_2_FILE: &str = "quiz_2_grades.csv";
pub const SUMMARY_FILE: &str = "summary.json";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Where the pipeline reads from and writes to.
///
/// `Default` follows the `data/...` and `output/` conventions relative to the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub roster_path: PathBuf,
    pub homework_path: PathBuf,
    pub quiz_1_path: PathBuf,
    pub quiz_2_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl PipelineConfig {
    /// Conventional file names under `data_dir`, reports under `output_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            roster_path: data_dir.join(ROSTER_FILE),
            homework_path: data_dir.join(HOMEWORK_FILE),
            quiz_1_path: data_dir.join(QUIZ_1_FILE),
            quiz_2_path: data_dir.join(QUIZ_2_FILE),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.roster_path, Path::new("data/students.json"));
        assert_eq!(config.homework_path, Path::new("data/homework_and_exams.csv"));
        assert_eq!(config.quiz_1_path, Path::new("data/quiz_1_grades.csv"));
        assert_eq!(config.quiz_2_path, Path::new("data/quiz_2_grades.csv"));
        assert_eq!(config.output_dir, Path::new("output"));
        assert_eq!(config.summary_path(), Path::new("output/summary.json"));
    }

    #[test]
    fn test_in_dir_rebases() {
        let config = PipelineConfig::in_dir("/srv/term", "/tmp/reports");
        assert_eq!(config.quiz_2_path, Path::new("/srv/term/quiz_2_grades.csv"));
        assert_eq!(config.output_dir, Path::new("/tmp/reports"));
    }
}
