//! Set-based F1 metrics for entity-list tasks: exact match and partial (substring) match.

use crate::answer::EntitySet;
use crate::error::{EvalError, Result};
use crate::metrics::classification::check_aligned;

/// Mean per-row F1 where a hit is an exact string match between gold and prediction.
///
/// Per row: recall = |gold ∩ pred| / |gold|, precision = |gold ∩ pred| / |pred|
/// (0 when pred is empty). Fails with `InvalidInput` on an empty gold set.
pub fn exact_f1(gold: &[EntitySet], pred: &[EntitySet]) -> Result<f64> {
    mean_row_f1(gold, pred, |g, p| g.intersection(p).count())
}

/// Mean per-row F1 where a gold entity is hit if it is a substring of some
/// predicted entity, or some predicted entity is a substring of it.
///
/// Each gold entity contributes at most one hit. The precision denominator is
/// still the number of predicted entities.
pub fn partial_f1(gold: &[EntitySet], pred: &[EntitySet]) -> Result<f64> {
    mean_row_f1(gold, pred, partial_match_count)
}

/// Number of gold entities that overlap some predicted entity by substring.
pub fn partial_match_count(gold: &EntitySet, pred: &EntitySet) -> usize {
    gold.iter()
        .filter(|g| pred.iter().any(|p| p.contains(g.as_str()) || g.contains(p.as_str())))
        .count()
}

fn mean_row_f1<F>(gold: &[EntitySet], pred: &[EntitySet], hits: F) -> Result<f64>
where
    F: Fn(&EntitySet, &EntitySet) -> usize,
{
    check_aligned(gold, pred)?;

    let mut sum = 0.0;
    for (row, (g, p)) in gold.iter().zip(pred).enumerate() {
        if g.is_empty() {
            return Err(EvalError::InvalidInput(format!(
                "gold entity set is empty at row {}",
                row
            )));
        }
        sum += row_f1(hits(g, p), g.len(), p.len());
    }
    Ok(sum / gold.len() as f64)
}

fn row_f1(hits: usize, gold_len: usize, pred_len: usize) -> f64 {
    let recall = hits as f64 / gold_len as f64;
    let precision = if pred_len == 0 {
        0.0
    } else {
        hits as f64 / pred_len as f64
    };
    if recall + precision == 0.0 {
        0.0
    } else {
        2.0 * recall * precision / (recall + precision)
    }
}
