use anyhow::{Context, Result};
use clap::Parser;
use jmedeval::{Config, Evaluator, ReplayGenerator};
use std::path::PathBuf;

/// Score model responses on the Japanese medical benchmark tasks.
#[derive(Parser, Debug)]
#[command(name = "jmedeval", version)]
struct Args {
    /// Path to the configuration file (default: $JMEDEVAL_CONFIG or config.yaml).
    #[arg(long)]
    cfg: Option<PathBuf>,

    /// Run document to replay responses from (overrides responses_file).
    #[arg(long)]
    responses: Option<PathBuf>,

    /// Output directory (overrides output_dir).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.cfg {
        Some(path) => {
            let _ = dotenv::dotenv();
            Config::load_from(path)?
        }
        None => Config::load()?,
    };

    if let Some(responses) = args.responses {
        config.responses_file = responses;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    log::info!("Starting jmedeval v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Model: {}", config.model_name);
    log::info!("Datasets: {}", config.dataset_dir.display());
    log::info!("Tasks: {}", config.task_names.join(", "));

    let generator = ReplayGenerator::from_file(&config.responses_file)?;
    let mut evaluator = Evaluator::from_config(&config, generator)?;

    let output_path = config.output_path();
    let run = evaluator
        .run_and_save(&output_path)
        .with_context(|| format!("Evaluation of {} failed", config.model_name))?;

    println!("\n=== Evaluation Results ({}) ===", run.model_name);
    for (task_name, report) in &run.tasks {
        println!("{:<16} {}", task_name, report.summary());
    }
    println!("\nResults written to {}", output_path.display());
    println!("Evaluation finished.");

    Ok(())
}
