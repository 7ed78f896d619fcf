//! Evaluation driver: dataset -> generator -> scoring -> run report.
//!
//! Tasks run one after another, and each is generated and scored before the
//! next starts. Rows within a task are generated in file order.

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::generate::Generator;
use crate::report::{RunReport, ScoreReport};
use crate::task::{score_task, Task};
use std::path::{Path, PathBuf};

/// Runs the configured tasks against a generator.
pub struct Evaluator<G: Generator> {
    generator: G,
    model_name: String,
    chat_template: Option<String>,
    generator_kwargs: serde_json::Map<String, serde_json::Value>,
    dataset_dir: PathBuf,
    tasks: Vec<Task>,
}

impl<G: Generator> Evaluator<G> {
    pub fn new(
        generator: G,
        model_name: impl Into<String>,
        dataset_dir: impl Into<PathBuf>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            generator,
            model_name: model_name.into(),
            chat_template: None,
            generator_kwargs: serde_json::Map::new(),
            dataset_dir: dataset_dir.into(),
            tasks,
        }
    }

    /// Build from a validated config. Fails if a task name does not route.
    pub fn from_config(config: &Config, generator: G) -> anyhow::Result<Self> {
        let mut evaluator = Self::new(
            generator,
            config.model_name.clone(),
            config.dataset_dir.clone(),
            config.tasks()?,
        );
        evaluator.chat_template = config.chat_template.clone();
        evaluator.generator_kwargs = config.generator_kwargs.clone();
        Ok(evaluator)
    }

    pub fn with_generator_kwargs(mut self, kwargs: serde_json::Map<String, serde_json::Value>) -> Self {
        self.generator_kwargs = kwargs;
        self
    }

    pub fn with_chat_template(mut self, template: impl Into<String>) -> Self {
        self.chat_template = Some(template.into());
        self
    }

    /// Evaluate a single task end to end.
    pub fn evaluate_task(&mut self, task: Task) -> Result<ScoreReport> {
        let dataset = Dataset::load(&self.dataset_dir, task)?;
        log::info!(
            "Processing {} ({} rows) with {} generator",
            task,
            dataset.rows.len(),
            self.generator.name()
        );

        let mut responses = Vec::with_capacity(dataset.rows.len());
        for row in &dataset.rows {
            let response = self.generator.generate(task, row)?;
            log::debug!("{} row {}: {:?}", task, row.index, response);
            responses.push(response);
        }

        let report = score_task(task, &dataset.answers(), &responses)?;
        log::info!("{}: {}", task, report.summary());
        Ok(report)
    }

    /// Evaluate every configured task in order. The first error aborts the run.
    pub fn run(&mut self) -> Result<RunReport> {
        let mut run = RunReport::new(
            self.model_name.clone(),
            self.chat_template.clone(),
            self.generator_kwargs.clone(),
        );

        let tasks = self.tasks.clone();
        for (i, task) in tasks.into_iter().enumerate() {
            log::info!("Task {}/{}: {}", i + 1, self.tasks.len(), task);
            let report = self.evaluate_task(task)?;
            run.insert(task.name(), report);
        }

        Ok(run)
    }

    /// Run all tasks and write the results document to `output_path`.
    pub fn run_and_save(&mut self, output_path: &Path) -> Result<RunReport> {
        let run = self.run()?;
        run.save(output_path)?;
        Ok(run)
    }
}
