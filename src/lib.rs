pub mod config;
pub mod error;
pub mod grading;
pub mod output;
pub mod pipeline;
pub mod roster;
pub mod table;

pub use config::PipelineConfig;
pub use error::{ErrorKind, GradeError};
pub use pipeline::run;
