pub mod answer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod generate;
pub mod metrics;
pub mod report;
pub mod task;

pub use answer::{parse_choice, parse_entity_list, Choice, EntitySet};
pub use config::Config;
pub use error::{EvalError, Result};
pub use evaluator::Evaluator;
pub use generate::{Generator, ReplayGenerator};
pub use report::{RunReport, ScoreReport};
pub use task::{score_task, Task, TaskKind};
