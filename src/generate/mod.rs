//! Generation backends. The evaluator only sees the [`Generator`] trait; how a
//! response is produced (a live model, a recorded run) is up to the backend.

pub mod replay;

use crate::dataset::DatasetRow;
use crate::error::Result;
use crate::task::Task;

pub use replay::ReplayGenerator;

/// Produces one raw response per dataset row.
pub trait Generator {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Produce the raw response text for `row` of `task`.
    fn generate(&mut self, task: Task, row: &DatasetRow) -> Result<String>;
}
