//! Dataset loading: one CSV file per task, `<dataset_dir>/<task>.csv`.

use crate::error::{EvalError, Result};
use crate::task::Task;
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};

const ANSWER_COLUMN: &str = "answer";
const QUESTION_COLUMN: &str = "question";
const OPTION_COLUMNS: [&str; 6] = ["optionA", "optionB", "optionC", "optionD", "optionE", "optionF"];

/// A single labeled example.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// 0-based position in the file (header excluded)
    pub index: usize,
    pub question: String,
    /// Non-empty option texts in A-F order. Empty for entity-list tasks.
    pub options: Vec<String>,
    /// Gold answer exactly as stored: a letter, or a string-list literal
    pub answer: String,
}

/// All rows of one task's dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub task: Task,
    pub path: PathBuf,
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Path of the CSV file for `task` under `dataset_dir`.
    pub fn path_for(dataset_dir: &Path, task: Task) -> PathBuf {
        dataset_dir.join(format!("{}.csv", task.name()))
    }

    /// Load `<dataset_dir>/<task>.csv`.
    ///
    /// The `answer` column is required; `question` and `optionA`..`optionF`
    /// are optional. Fails on an empty dataset.
    pub fn load(dataset_dir: &Path, task: Task) -> Result<Self> {
        let path = Self::path_for(dataset_dir, task);
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&path)?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let answer_idx = column(ANSWER_COLUMN).ok_or_else(|| {
            EvalError::Dataset(format!(
                "{} has no '{}' column",
                path.display(),
                ANSWER_COLUMN
            ))
        })?;
        let question_idx = column(QUESTION_COLUMN);
        let option_idx: Vec<usize> = if task.is_choice() {
            OPTION_COLUMNS.iter().filter_map(|&name| column(name)).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            rows.push(DatasetRow {
                index,
                question: field(&record, question_idx),
                options: option_idx
                    .iter()
                    .map(|&i| field(&record, Some(i)))
                    .filter(|o| !o.is_empty())
                    .collect(),
                answer: field(&record, Some(answer_idx)),
            });
        }

        if rows.is_empty() {
            return Err(EvalError::Dataset(format!(
                "{} contains no rows",
                path.display()
            )));
        }

        log::info!("Loaded {} rows for {} from {}", rows.len(), task, path.display());
        Ok(Self { task, path, rows })
    }

    /// Gold answers in row order.
    pub fn answers(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.answer.clone()).collect()
    }
}

fn field(record: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
}
