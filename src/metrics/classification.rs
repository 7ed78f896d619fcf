//! Classification metrics for single-choice tasks: accuracy and Cohen's kappa.

use crate::error::{EvalError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Off-diagonal weighting scheme for Cohen's kappa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KappaWeights {
    /// Unweighted: every disagreement costs 1.
    None,
    /// Disagreement costs `|i - j|` in label-index distance.
    Linear,
    /// Disagreement costs `(i - j)^2` in label-index distance.
    Quadratic,
}

impl KappaWeights {
    fn weight(&self, i: usize, j: usize) -> f64 {
        let d = i.abs_diff(j) as f64;
        match self {
            KappaWeights::None => {
                if i == j {
                    0.0
                } else {
                    1.0
                }
            }
            KappaWeights::Linear => d,
            KappaWeights::Quadratic => d * d,
        }
    }
}

/// Check that two aligned sequences are non-empty and of equal length.
pub(crate) fn check_aligned<G, P>(gold: &[G], pred: &[P]) -> Result<()> {
    if gold.len() != pred.len() {
        return Err(EvalError::InvalidInput(format!(
            "gold and prediction lengths differ ({} vs {})",
            gold.len(),
            pred.len()
        )));
    }
    if gold.is_empty() {
        return Err(EvalError::InvalidInput(
            "cannot score an empty sequence".to_string(),
        ));
    }
    Ok(())
}

/// Fraction of positions where `gold[i] == pred[i]`.
pub fn accuracy<T: PartialEq>(gold: &[T], pred: &[T]) -> Result<f64> {
    check_aligned(gold, pred)?;
    let correct = gold.iter().zip(pred).filter(|(g, p)| g == p).count();
    Ok(correct as f64 / gold.len() as f64)
}

/// Cohen's kappa between gold labels and predictions.
///
/// Labels are the sorted union of values observed in either sequence; the
/// weight of a cell depends on the distance between label indices. Expected
/// agreement comes from the product of the marginals. Returns NaN when the
/// expected weighted disagreement is zero (only one label observed).
pub fn cohen_kappa<T: Ord>(gold: &[T], pred: &[T], weights: KappaWeights) -> Result<f64> {
    check_aligned(gold, pred)?;

    // Every value in either sequence has an index
    let label_index: BTreeMap<&T, usize> = gold
        .iter()
        .chain(pred)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, label)| (label, i))
        .collect();
    let n = label_index.len();

    // confusion[i][j]: gold label i, predicted label j
    let mut confusion = vec![vec![0.0f64; n]; n];
    for (g, p) in gold.iter().zip(pred) {
        confusion[label_index[&g]][label_index[&p]] += 1.0;
    }

    let gold_marginal: Vec<f64> = confusion.iter().map(|row| row.iter().sum()).collect();
    let pred_marginal: Vec<f64> = (0..n)
        .map(|j| confusion.iter().map(|row| row[j]).sum())
        .collect();
    let total = gold.len() as f64;

    let mut observed = 0.0;
    let mut expected = 0.0;
    for i in 0..n {
        for j in 0..n {
            let w = weights.weight(i, j);
            observed += w * confusion[i][j];
            expected += w * gold_marginal[i] * pred_marginal[j] / total;
        }
    }

    if expected == 0.0 {
        log::warn!("Cohen's kappa undefined: only one label observed across gold and predictions");
        return Ok(f64::NAN);
    }
    Ok(1.0 - observed / expected)
}
