//! Score and run reports, serialized as the per-run JSON results document.

use crate::answer::{Choice, EntitySet};
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Answers for one task, shaped by the task kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answers {
    Choices(Vec<Choice>),
    Entities(Vec<EntitySet>),
}

/// Scores for a single task plus the rows they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Metric name -> value. NaN serializes as `null`.
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
    /// Parsed gold answers
    pub answer: Answers,
    /// Raw model responses
    pub generated_text: Vec<String>,
    /// Parsed predictions
    pub predict: Answers,
}

impl ScoreReport {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// One-line `name=value` summary for logging.
    pub fn summary(&self) -> String {
        self.metrics
            .iter()
            .map(|(name, value)| format!("{}={:.4}", name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The whole-run document: model metadata plus one entry per task, in the
/// order the tasks were inserted.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_template: Option<String>,
    pub generator_kwargs: Map<String, Value>,
    #[serde(flatten)]
    pub tasks: IndexMap<String, ScoreReport>,
}

impl RunReport {
    pub fn new(
        model_name: impl Into<String>,
        chat_template: Option<String>,
        generator_kwargs: Map<String, Value>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            chat_template,
            generator_kwargs,
            tasks: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, task_name: impl Into<String>, report: ScoreReport) {
        self.tasks.insert(task_name.into(), report);
    }

    /// Write as pretty-printed UTF-8 JSON. Non-ASCII text is written as-is.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Wrote results to {}", path.display());
        Ok(())
    }
}

/// Loosely-typed view of a previously written run document.
///
/// Only the fields needed to replay or inspect a run are typed; everything
/// else is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedRun {
    pub model_name: String,
    #[serde(default)]
    pub chat_template: Option<String>,
    #[serde(default)]
    pub generator_kwargs: Map<String, Value>,
    #[serde(flatten)]
    pub tasks: IndexMap<String, Value>,
}

impl SavedRun {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The `generated_text` array for a task, if present and all strings.
    pub fn generated_text(&self, task_name: &str) -> Option<Vec<String>> {
        self.tasks
            .get(task_name)?
            .get("generated_text")?
            .as_array()?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}
