//! Metric engine: accuracy and Cohen's kappa for choice tasks, exact and
//! partial F1 for entity-list tasks. All functions are pure.

pub mod classification;
pub mod entity;

pub use classification::{accuracy, cohen_kappa, KappaWeights};
pub use entity::{exact_f1, partial_f1, partial_match_count};
