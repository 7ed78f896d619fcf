//! Score one task's recorded responses against its dataset and print the metrics.

use clap::Parser;
use jmedeval::{dataset::Dataset, report::SavedRun, score_task, Task};
use std::path::PathBuf;

/// Re-score a single task from a previous run document.
#[derive(Parser, Debug)]
#[command(name = "score")]
struct Args {
    /// Task name (e.g. jmmlu_med, nrner).
    #[arg(long)]
    task: String,

    /// Directory holding <task>.csv.
    #[arg(long, default_value = "datasets")]
    dataset_dir: PathBuf,

    /// Run document whose generated_text is scored.
    #[arg(long)]
    responses: PathBuf,

    /// Also print per-row predictions.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let task: Task = args.task.parse()?;

    let dataset = Dataset::load(&args.dataset_dir, task)?;
    let saved = SavedRun::load(&args.responses)?;
    let responses = saved.generated_text(task.name()).ok_or_else(|| {
        anyhow::anyhow!(
            "{} has no generated_text for {}",
            args.responses.display(),
            task
        )
    })?;

    let report = score_task(task, &dataset.answers(), &responses)?;

    println!("=== {} ({} rows, model {}) ===", task, dataset.rows.len(), saved.model_name);
    for (name, value) in &report.metrics {
        println!("{:<12} {:.4}", name, value);
    }

    if args.verbose {
        let predictions = serde_json::to_value(&report.predict)?;
        let answers = serde_json::to_value(&report.answer)?;
        if let (Some(pred), Some(gold)) = (predictions.as_array(), answers.as_array()) {
            println!();
            for (i, (p, g)) in pred.iter().zip(gold).enumerate() {
                let mark = if p == g { "✓" } else { "✗" };
                println!("{} {:>4} gold={} predict={}", mark, i, g, p);
            }
        }
    }

    Ok(())
}
