use super::Generator;
use crate::dataset::DatasetRow;
use crate::error::{EvalError, Result};
use crate::report::SavedRun;
use crate::task::Task;
use std::collections::HashMap;
use std::path::Path;

/// Replays the `generated_text` recorded in a previous run document.
///
/// Lets a run be re-scored (after a parser or metric change, or against a
/// corrected dataset) without calling the model again. Rows are matched by
/// index, so the dataset must be in the same order as when it was recorded.
pub struct ReplayGenerator {
    source: String,
    responses: HashMap<String, Vec<String>>,
}

impl ReplayGenerator {
    /// Load recorded responses from a run document on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let saved = SavedRun::load(path).map_err(|e| {
            EvalError::Generation(format!(
                "Failed to load recorded responses from {}: {}",
                path.display(),
                e
            ))
        })?;

        let responses: HashMap<String, Vec<String>> = saved
            .tasks
            .keys()
            .filter_map(|name| saved.generated_text(name).map(|texts| (name.clone(), texts)))
            .collect();

        log::info!(
            "Loaded recorded responses for {} tasks (model {}) from {}",
            responses.len(),
            saved.model_name,
            path.display()
        );

        Ok(Self {
            source: path.display().to_string(),
            responses,
        })
    }

    /// Build from in-memory responses keyed by task name.
    pub fn from_responses(responses: HashMap<String, Vec<String>>) -> Self {
        Self {
            source: "memory".to_string(),
            responses,
        }
    }

    /// Number of recorded responses for a task.
    pub fn recorded(&self, task: Task) -> Option<usize> {
        self.responses.get(task.name()).map(Vec::len)
    }
}

impl Generator for ReplayGenerator {
    fn name(&self) -> &str {
        "replay"
    }

    fn generate(&mut self, task: Task, row: &DatasetRow) -> Result<String> {
        let texts = self.responses.get(task.name()).ok_or_else(|| {
            EvalError::Generation(format!("{} has no recorded responses for {}", self.source, task))
        })?;

        texts.get(row.index).cloned().ok_or_else(|| {
            EvalError::Generation(format!(
                "{} has {} recorded responses for {}, row {} requested",
                self.source,
                texts.len(),
                task,
                row.index
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn row(index: usize) -> DatasetRow {
        DatasetRow {
            index,
            question: String::new(),
            options: Vec::new(),
            answer: "A".to_string(),
        }
    }

    #[test]
    fn replays_by_row_index() {
        let mut responses = HashMap::new();
        responses.insert("smdis".to_string(), vec!["A".to_string(), "C".to_string()]);
        let mut generator = ReplayGenerator::from_responses(responses);

        assert_eq!(generator.generate(Task::Smdis, &row(1)).unwrap(), "C");
        assert_eq!(generator.generate(Task::Smdis, &row(0)).unwrap(), "A");
        assert_eq!(generator.recorded(Task::Smdis), Some(2));
    }

    #[test]
    fn missing_task_or_row_is_error() {
        let mut responses = HashMap::new();
        responses.insert("smdis".to_string(), vec!["A".to_string()]);
        let mut generator = ReplayGenerator::from_responses(responses);

        let err = generator.generate(Task::Crade, &row(0)).unwrap_err();
        assert!(matches!(err, EvalError::Generation(_)));
        assert!(generator.generate(Task::Smdis, &row(5)).is_err());
    }

    #[test]
    fn loads_run_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("previous.json");
        fs::write(
            &path,
            r#"{
  "model_name": "prev-model",
  "generator_kwargs": {},
  "jmmlu_med": {"accuracy": 1.0, "kappa": null, "answer": ["A"], "generated_text": ["A です"], "predict": ["A"]},
  "nrner": {"exact_f1": 0.0, "generated_text": ["['発熱']", 3]}
}"#,
        )
        .unwrap();

        let mut generator = ReplayGenerator::from_file(&path).unwrap();
        assert_eq!(generator.generate(Task::JmmluMed, &row(0)).unwrap(), "A です");
        // Non-string entries make the whole task unavailable
        assert_eq!(generator.recorded(Task::Nrner), None);
    }

    #[test]
    fn unreadable_document_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ReplayGenerator::from_file(&path),
            Err(EvalError::Generation(_))
        ));
    }
}
