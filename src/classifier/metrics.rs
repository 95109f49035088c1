//! Evaluation report for a held-out test set

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Precision, recall and F1 for one label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of test samples whose true label is this one
    pub support: usize,
}

/// Classification report over a test set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub per_label: BTreeMap<String, LabelMetrics>,
    pub macro_avg: LabelMetrics,
    pub weighted_avg: LabelMetrics,
    pub test_samples: usize,
}

impl ClassificationReport {
    /// Compare true labels with predictions, pairwise
    ///
    /// Undefined ratios (no predictions or no support) count as 0.
    pub fn evaluate(truth: &[String], predicted: &[String]) -> Self {
        let n = truth.len().min(predicted.len());
        let labels: BTreeSet<&str> = truth[..n]
            .iter()
            .chain(predicted[..n].iter())
            .map(String::as_str)
            .collect();

        let correct = truth[..n]
            .iter()
            .zip(&predicted[..n])
            .filter(|(t, p)| t == p)
            .count();

        let mut per_label = BTreeMap::new();
        for label in labels {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            for (t, p) in truth[..n].iter().zip(&predicted[..n]) {
                match (t == label, p == label) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }

            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1_score = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            per_label.insert(
                label.to_string(),
                LabelMetrics {
                    precision,
                    recall,
                    f1_score,
                    support: tp + fn_,
                },
            );
        }

        let (macro_avg, weighted_avg) = averages(&per_label, n);

        Self {
            accuracy: ratio(correct, n),
            per_label,
            macro_avg,
            weighted_avg,
            test_samples: n,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn averages(
    per_label: &BTreeMap<String, LabelMetrics>,
    total: usize,
) -> (LabelMetrics, LabelMetrics) {
    let count = per_label.len().max(1) as f64;
    let weight_total = total.max(1) as f64;

    let mut macro_avg = LabelMetrics {
        precision: 0.0,
        recall: 0.0,
        f1_score: 0.0,
        support: total,
    };
    let mut weighted_avg = macro_avg;

    for m in per_label.values() {
        macro_avg.precision += m.precision / count;
        macro_avg.recall += m.recall / count;
        macro_avg.f1_score += m.f1_score / count;

        let w = m.support as f64 / weight_total;
        weighted_avg.precision += m.precision * w;
        weighted_avg.recall += m.recall * w;
        weighted_avg.f1_score += m.f1_score * w;
    }

    (macro_avg, weighted_avg)
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy: {:.4} ({} test samples)", self.accuracy, self.test_samples)?;
        for (label, m) in &self.per_label {
            writeln!(
                f,
                "{label:20} precision: {:.2}, recall: {:.2}, f1-score: {:.2}, support: {}",
                m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        write!(
            f,
            "{:20} precision: {:.2}, recall: {:.2}, f1-score: {:.2}",
            "macro avg", self.macro_avg.precision, self.macro_avg.recall, self.macro_avg.f1_score
        )
    }
}
