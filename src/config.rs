use crate::task::Task;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Model identifier, echoed as `model_name` in the results
    pub model_name: String,
    /// Directory holding `<task>.csv` files
    pub dataset_dir: PathBuf,
    /// Tasks to run, in order
    pub task_names: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Results are written to `<output_dir>/<save_file_name>.json`
    pub save_file_name: String,
    /// Sampling parameters the responses were generated with, echoed verbatim
    #[serde(default)]
    pub generator_kwargs: Map<String, Value>,
    #[serde(default)]
    pub chat_template: Option<String>,
    /// Run document whose `generated_text` is replayed
    pub responses_file: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in JMEDEVAL_CONFIG environment variable
    /// 2. ./config.yaml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = std::env::var("JMEDEVAL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from an explicit path.
    ///
    /// `.toml` files are parsed as TOML; anything else as YAML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let is_toml = config_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let config: Config = if is_toml {
            toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            serde_yaml_ng::from_str(&config_str)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            anyhow::bail!("model_name must not be empty");
        }

        if !self.dataset_dir.is_dir() {
            anyhow::bail!(
                "dataset_dir must be an existing directory: {}",
                self.dataset_dir.display()
            );
        }

        if self.task_names.is_empty() {
            anyhow::bail!("task_names must list at least one task");
        }

        // Unknown task names are fatal; catch them before any work is done
        self.tasks()?;

        if self.save_file_name.trim().is_empty() {
            anyhow::bail!("save_file_name must not be empty");
        }

        Ok(())
    }

    /// Resolve `task_names` against the routing table.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        self.task_names
            .iter()
            .map(|name| {
                name.parse::<Task>()
                    .with_context(|| format!("Invalid entry in task_names: {}", name))
            })
            .collect()
    }

    /// Path of the results document
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.save_file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn yaml_config(temp_dir: &TempDir, tasks: &str) -> String {
        let dataset_dir = temp_dir.path().canonicalize().unwrap();
        format!(
            r#"
model_name: test-model
dataset_dir: "{}"
task_names: [{}]
save_file_name: run1
generator_kwargs:
  temperature: 0.0
  top_p: 1.0
responses_file: previous.json
"#,
            dataset_dir.to_str().unwrap().replace('\\', "\\\\"),
            tasks
        )
    }

    #[test]
    fn test_config_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, yaml_config(&temp_dir, "jmmlu_med, nrner")).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.model_name, "test-model");
        assert_eq!(config.tasks().unwrap(), vec![Task::JmmluMed, Task::Nrner]);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.output_path(), PathBuf::from("results").join("run1.json"));
        assert_eq!(config.generator_kwargs["temperature"], 0.0);
        assert!(config.chat_template.is_none());
    }

    #[test]
    fn test_config_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let dataset_dir = temp_dir.path().canonicalize().unwrap();
        let content = format!(
            r#"
model_name = "test-model"
dataset_dir = "{}"
task_names = ["crade"]
output_dir = "out"
save_file_name = "run2"
chat_template = "{{{{ messages }}}}"
responses_file = "previous.json"

[generator_kwargs]
do_sample = false
"#,
            dataset_dir.to_str().unwrap().replace('\\', "\\\\")
        );
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("out").join("run2.json"));
        assert_eq!(config.chat_template.as_deref(), Some("{{ messages }}"));
        assert_eq!(config.generator_kwargs["do_sample"], false);
    }

    #[test]
    fn test_config_unknown_task() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, yaml_config(&temp_dir, "jmmlu_med, medqa")).unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("medqa"));
    }

    #[test]
    fn test_config_empty_tasks() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, yaml_config(&temp_dir, "")).unwrap();
        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_config_missing_dataset_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "model_name: m\ndataset_dir: /nonexistent/datasets\ntask_names: [nrner]\nsave_file_name: r\nresponses_file: p.json\n",
        )
        .unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("dataset_dir"));
    }

    #[test]
    fn test_config_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, yaml_config(&temp_dir, "smdis")).unwrap();

        let original = std::env::var("JMEDEVAL_CONFIG").ok();
        std::env::set_var("JMEDEVAL_CONFIG", config_path.to_str().unwrap());
        let config = Config::load();
        std::env::remove_var("JMEDEVAL_CONFIG");
        if let Some(v) = original {
            std::env::set_var("JMEDEVAL_CONFIG", v);
        }

        assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
        assert_eq!(config.unwrap().task_names, vec!["smdis".to_string()]);
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let original = std::env::var("JMEDEVAL_CONFIG").ok();
        std::env::set_var("JMEDEVAL_CONFIG", "nonexistent.yaml");
        let config = Config::load();
        assert!(config.is_err());
        std::env::remove_var("JMEDEVAL_CONFIG");
        if let Some(v) = original {
            std::env::set_var("JMEDEVAL_CONFIG", v);
        }
    }
}
