//! Training dataset loading and splitting

use crate::domain::{Result, TriageError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Seed used for the train/test shuffle
pub const SPLIT_SEED: u64 = 42;

/// Fraction of samples held out for evaluation
pub const TEST_FRACTION: f64 = 0.2;

/// One labelled support email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEmail {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    email: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
}

/// Load a CSV dataset with `email` and `type` columns
///
/// Extra columns are ignored. Rows with a missing or blank email or type
/// are dropped.
pub fn load_dataset(path: &Path) -> Result<Vec<LabeledEmail>> {
    let file = std::fs::File::open(path).map_err(|e| {
        TriageError::Dataset(format!("Failed to open dataset {}: {e}", path.display()))
    })?;
    let samples = read_dataset(file)?;

    tracing::info!(
        path = %path.display(),
        samples = samples.len(),
        "Training dataset loaded"
    );

    Ok(samples)
}

/// Parse a CSV dataset from any reader
pub fn read_dataset<R: Read>(reader: R) -> Result<Vec<LabeledEmail>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in ["email", "type"] {
        if !headers.iter().any(|h| h == column) {
            return Err(TriageError::Dataset(format!(
                "Dataset is missing required column '{column}'"
            )));
        }
    }

    let mut samples = Vec::new();
    let mut dropped = 0usize;
    for row in csv_reader.deserialize::<DatasetRow>() {
        let row = row?;
        match (row.email, row.category) {
            (Some(text), Some(category))
                if !text.trim().is_empty() && !category.trim().is_empty() =>
            {
                samples.push(LabeledEmail {
                    text,
                    category: category.trim().to_string(),
                });
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Dropped dataset rows with missing values");
    }

    Ok(samples)
}

/// Shuffle with a fixed seed and split into (train, test)
///
/// The test set gets `ceil(n * test_fraction)` samples and the train set
/// the rest; both are non-empty.
pub fn train_test_split(
    samples: &[LabeledEmail],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<LabeledEmail>, Vec<LabeledEmail>)> {
    let n = samples.len();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n < 2 || n_test == 0 || n_test >= n {
        return Err(TriageError::Dataset(format!(
            "Cannot split {n} samples with test fraction {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test = indices[..n_test].iter().map(|&i| samples[i].clone()).collect();
    let train = indices[n_test..].iter().map(|&i| samples[i].clone()).collect();

    Ok((train, test))
}
