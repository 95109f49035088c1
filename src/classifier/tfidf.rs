//! TF-IDF vectorizer
//!
//! Document frequency pruning follows the usual conventions: terms in fewer
//! than `min_df` documents or in more than `max_df` of all documents are
//! dropped, then the `max_features` most frequent terms across the corpus
//! are kept. Idf is smoothed, `ln((1 + n) / (1 + df)) + 1`, and every
//! vector is L2-normalised.

use crate::domain::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Vocabulary pruning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TfidfParams {
    pub max_features: usize,
    /// Minimum number of documents a term must appear in
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in
    pub max_df: f64,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 2,
            max_df: 0.85,
        }
    }
}

/// Sparse L2-normalised term vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f32)>,
}

impl TermVector {
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with a dense vector
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.entries
            .iter()
            .filter_map(|&(i, w)| dense.get(i).map(|d| w * d))
            .sum()
    }
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    params: TfidfParams,
    /// term -> column index, indices assigned in term order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from tokenised documents
    pub fn fit(documents: &[Vec<String>], params: TfidfParams) -> Result<Self> {
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(TriageError::Classification(
                "Cannot fit vectorizer on an empty corpus".to_string(),
            ));
        }

        let max_doc_count = (params.max_df * n_docs as f64).floor() as usize;
        if max_doc_count < params.min_df {
            return Err(TriageError::Classification(format!(
                "max_df corresponds to {max_doc_count} documents, fewer than min_df {}",
                params.min_df
            )));
        }

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for doc in documents {
            let mut seen = HashSet::new();
            for token in doc {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut kept: Vec<(&str, usize)> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= params.min_df && df <= max_doc_count)
            .map(|(&term, _)| (term, term_freq[term]))
            .collect();

        if kept.is_empty() {
            return Err(TriageError::Classification(
                "After pruning, no terms remain; lower min_df or raise max_df".to_string(),
            ));
        }

        // most frequent first, alphabetical among equals
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(params.max_features);
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let vocabulary: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, (term, _))| (term.to_string(), i))
            .collect();

        let n = n_docs as f64;
        let idf = kept
            .iter()
            .map(|(term, _)| {
                let df = doc_freq[term] as f64;
                (((1.0 + n) / (1.0 + df)).ln() + 1.0) as f32
            })
            .collect();

        Ok(Self {
            params,
            vocabulary,
            idf,
        })
    }

    /// Vectorise a tokenised document; unknown terms are ignored
    pub fn transform(&self, tokens: &[String]) -> TermVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        TermVector { entries }
    }

    /// Check that every vocabulary column has an idf weight
    pub fn check_consistency(&self) -> std::result::Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        if let Some((term, &index)) = self.vocabulary.iter().find(|(_, &i)| i >= self.idf.len()) {
            return Err(format!("term '{term}' has out-of-range column {index}"));
        }
        Ok(())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn params(&self) -> TfidfParams {
        self.params
    }

    /// Idf weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }
}
