//! Classifier text normalisation
//!
//! Lowercases, drops everything that is not an ASCII letter or whitespace,
//! removes English stopwords and folds regular plurals onto their singular.
//! Placeholders such as `[credit_debit_no]` survive as the single token
//! `creditdebitno`, which lets the classifier learn from what was masked.

use std::collections::HashSet;
use std::sync::OnceLock;

/// English stopword list (alphabetic entries of the NLTK corpus)
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Whether `token` is an English stopword
pub fn is_stopword(token: &str) -> bool {
    stopwords().contains(token)
}

/// Normalise `text` into classifier tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(singularize)
        .collect()
}

/// Fold regular English plurals onto the singular form
///
/// Only suffix rules; irregular plurals pass through unchanged.
pub fn singularize(token: &str) -> String {
    let len = token.len();

    if len > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..len - 3]);
    }
    if token.ends_with("sses") {
        return token[..len - 2].to_string();
    }
    if len > 4
        && (token.ends_with("xes")
            || token.ends_with("ches")
            || token.ends_with("shes")
            || token.ends_with("zes"))
    {
        return token[..len - 2].to_string();
    }
    if len > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..len - 1].to_string();
    }

    token.to_string()
}
