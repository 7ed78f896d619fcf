//! Task routing: each benchmark task maps to one answer parser and one metric set.

use crate::answer::{parse_choice, parse_entity_list, parse_string_list, Choice, EntitySet};
use crate::error::{EvalError, Result};
use crate::metrics::{accuracy, cohen_kappa, exact_f1, partial_f1, KappaWeights};
use crate::report::{Answers, ScoreReport};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const METRIC_ACCURACY: &str = "accuracy";
pub const METRIC_KAPPA: &str = "kappa";
pub const METRIC_EXACT_F1: &str = "exact_f1";
pub const METRIC_PARTIAL_F1: &str = "partial_f1";

/// Benchmark tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// JMMLU medical subset
    JmmluMed,
    /// Radiology report grading
    Crade,
    /// Radiology report TNM staging
    Rrtnm,
    /// Symptom-to-disease classification
    Smdis,
    /// Clinical semantic textual similarity
    Jcsts,
    /// Medical record NER: diseases
    MrnerDisease,
    /// Medical record NER: medicines
    MrnerMedicine,
    /// Nursing record NER
    Nrner,
}

/// Answer shape and metric set shared by a group of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// One letter A-F; scored by accuracy and kappa with the given weighting.
    SingleChoice { kappa: KappaWeights },
    /// A list of entity strings; scored by exact and partial F1.
    EntityList,
}

impl TaskKind {
    pub fn metric_names(&self) -> &'static [&'static str] {
        match self {
            TaskKind::SingleChoice { .. } => &[METRIC_ACCURACY, METRIC_KAPPA],
            TaskKind::EntityList => &[METRIC_EXACT_F1, METRIC_PARTIAL_F1],
        }
    }
}

impl Task {
    pub const ALL: [Task; 8] = [
        Task::JmmluMed,
        Task::Crade,
        Task::Rrtnm,
        Task::Smdis,
        Task::Jcsts,
        Task::MrnerDisease,
        Task::MrnerMedicine,
        Task::Nrner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Task::JmmluMed => "jmmlu_med",
            Task::Crade => "crade",
            Task::Rrtnm => "rrtnm",
            Task::Smdis => "smdis",
            Task::Jcsts => "jcsts",
            Task::MrnerDisease => "mrner_disease",
            Task::MrnerMedicine => "mrner_medicine",
            Task::Nrner => "nrner",
        }
    }

    /// The routing table.
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::JmmluMed | Task::Rrtnm | Task::Smdis => TaskKind::SingleChoice {
                kappa: KappaWeights::None,
            },
            Task::Crade | Task::Jcsts => TaskKind::SingleChoice {
                kappa: KappaWeights::Linear,
            },
            Task::MrnerDisease | Task::MrnerMedicine | Task::Nrner => TaskKind::EntityList,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind(), TaskKind::SingleChoice { .. })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        Task::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| EvalError::UnknownTask(s.to_string()))
    }
}

/// Parse gold answers and raw responses for `task` and compute its metric set.
///
/// `gold_answers` and `raw_responses` must be row-aligned. Choice gold labels
/// must be a single letter A-F; entity gold labels must be string-list literals
/// with at least one entity.
pub fn score_task(task: Task, gold_answers: &[String], raw_responses: &[String]) -> Result<ScoreReport> {
    if gold_answers.len() != raw_responses.len() {
        return Err(EvalError::InvalidInput(format!(
            "{}: {} gold answers but {} responses",
            task,
            gold_answers.len(),
            raw_responses.len()
        )));
    }

    let mut metrics = BTreeMap::new();
    let (answer, predict) = match task.kind() {
        TaskKind::SingleChoice { kappa } => {
            let gold = gold_answers
                .iter()
                .map(|a| a.parse::<Choice>())
                .collect::<Result<Vec<_>>>()?;
            let pred: Vec<Choice> = raw_responses.iter().map(|r| parse_choice(r)).collect();

            let unanswered = pred.iter().filter(|c| !c.is_answer()).count();
            if unanswered > 0 {
                log::debug!("{}: {} responses contained no choice letter", task, unanswered);
            }

            metrics.insert(METRIC_ACCURACY.to_string(), accuracy(&gold, &pred)?);
            metrics.insert(METRIC_KAPPA.to_string(), cohen_kappa(&gold, &pred, kappa)?);
            (Answers::Choices(gold), Answers::Choices(pred))
        }
        TaskKind::EntityList => {
            let gold = gold_answers
                .iter()
                .enumerate()
                .map(|(row, a)| parse_gold_entities(a, row))
                .collect::<Result<Vec<_>>>()?;
            let pred: Vec<EntitySet> = raw_responses.iter().map(|r| parse_entity_list(r)).collect();

            metrics.insert(METRIC_EXACT_F1.to_string(), exact_f1(&gold, &pred)?);
            metrics.insert(METRIC_PARTIAL_F1.to_string(), partial_f1(&gold, &pred)?);
            (Answers::Entities(gold), Answers::Entities(pred))
        }
    };

    Ok(ScoreReport {
        metrics,
        answer,
        generated_text: raw_responses.to_vec(),
        predict,
    })
}

/// Gold entity lists come from the dataset, so a malformed one is a data bug.
fn parse_gold_entities(raw: &str, row: usize) -> Result<EntitySet> {
    parse_string_list(raw)
        .map(|items| items.into_iter().collect())
        .ok_or_else(|| {
            EvalError::InvalidInput(format!(
                "gold answer at row {} is not a string list: {:?}",
                row, raw
            ))
        })
}
