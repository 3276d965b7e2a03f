pub mod clean;
pub mod csvio;
pub mod draft;
pub mod engine;
pub mod form_fill;
pub mod scrape;
pub mod template;

pub use crate::domain::model::{OutputFile, Record, TaskOutput, TaskReport};
pub use crate::domain::ports::{FormDriver, Storage, Task};
pub use crate::utils::error::Result;

/// Timestamp tag used in output filenames.
pub(crate) fn timestamp_tag() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
