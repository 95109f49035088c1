//! Gazetteer-feature NER model
//!
//! Candidate spans are runs of capitalised tokens separated only by spaces.
//! Each run is trimmed of greeting/boilerplate words and titles, then scored
//! by a log-linear model over gazetteer and context features. Runs whose
//! person probability exceeds the model threshold are labelled `PERSON`;
//! runs containing an organisation marker or naming a known place are
//! labelled `ORG` / `GPE` instead.

use super::{EntityKind, EntityRecognizer, RecognizedEntity};
use crate::masking::models::Span;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const EMBEDDED_MODEL: &str = include_str!("../../../resources/ner/en_person_sm.json");

/// Capitalised word, optionally `O'`-prefixed, camel-cased once (`McDonald`)
/// or hyphenated (`Jean-Luc`). Possessive `'s` is left outside the token.
const TOKEN_PATTERN: &str =
    r"\b(?:\p{Lu}['’])?\p{Lu}\p{Ll}+(?:\p{Lu}\p{Ll}+)?(?:-\p{Lu}\p{Ll}+)*\b";

/// Feature weights of the log-linear scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub bias: f32,
    /// First token is a known given name
    pub given_name: f32,
    /// Last token is a known surname
    pub surname: f32,
    /// Run is directly preceded by a title (Mr, Dr, ...)
    pub title_prefix: f32,
    /// Run has two or more tokens
    pub multi_token: f32,
    /// Run starts a sentence
    pub sentence_initial: f32,
    /// Applied once per token found in neither name gazetteer
    pub unknown_token: f32,
}

/// Serialized model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    /// Minimum person probability for a `PERSON` label
    pub threshold: f32,
    /// Longest run (in tokens) considered a single entity
    pub max_span_tokens: usize,
    pub weights: FeatureWeights,
    pub given_names: Vec<String>,
    pub surnames: Vec<String>,
    pub titles: Vec<String>,
    /// Capitalised words that never start or end a name (greetings, boilerplate)
    pub non_names: Vec<String>,
    /// Tokens marking a run as an organisation
    pub organizations: Vec<String>,
    /// Full runs naming a place
    pub locations: Vec<String>,
}

impl ModelArtifact {
    fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            anyhow::bail!("threshold must be in (0, 1), got {}", self.threshold);
        }
        if self.max_span_tokens == 0 {
            anyhow::bail!("max_span_tokens must be > 0");
        }
        if self.given_names.is_empty() {
            anyhow::bail!("given_names gazetteer is empty");
        }
        Ok(())
    }
}

fn lowercase_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Loaded gazetteer model, read-only after construction
#[derive(Debug)]
pub struct GazetteerModel {
    name: String,
    version: String,
    threshold: f32,
    max_span_tokens: usize,
    weights: FeatureWeights,
    given_names: HashSet<String>,
    surnames: HashSet<String>,
    titles: HashSet<String>,
    non_names: HashSet<String>,
    organizations: HashSet<String>,
    locations: HashSet<String>,
    token_regex: Regex,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    start: usize,
    end: usize,
}

impl GazetteerModel {
    /// Load the model shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_MODEL).context("Embedded NER model is invalid")
    }

    /// Load a model artifact from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read NER model: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to load NER model: {}", path.display()))
    }

    /// Load a model artifact from JSON content
    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(content).context("Failed to parse NER model JSON")?;
        Self::from_artifact(artifact)
    }

    /// Build a model from a deserialized artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate().context("Invalid NER model artifact")?;
        let token_regex = Regex::new(TOKEN_PATTERN).context("Invalid NER token pattern")?;

        Ok(Self {
            given_names: lowercase_set(&artifact.given_names),
            surnames: lowercase_set(&artifact.surnames),
            titles: lowercase_set(&artifact.titles),
            non_names: lowercase_set(&artifact.non_names),
            organizations: lowercase_set(&artifact.organizations),
            locations: lowercase_set(&artifact.locations),
            name: artifact.name,
            version: artifact.version,
            threshold: artifact.threshold,
            max_span_tokens: artifact.max_span_tokens,
            weights: artifact.weights,
            token_regex,
        })
    }

    /// Split capitalised tokens into runs joined only by spaces
    fn candidate_runs(&self, text: &str) -> Vec<Vec<Token>> {
        let mut runs: Vec<Vec<Token>> = Vec::new();
        let mut current: Vec<Token> = Vec::new();

        for m in self.token_regex.find_iter(text) {
            let token = Token {
                start: m.start(),
                end: m.end(),
            };
            let joined = current.last().is_some_and(|prev| {
                let gap = &text[prev.end..token.start];
                !gap.is_empty() && gap.chars().all(|c| c == ' ')
            });
            if !joined && !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            current.push(token);
        }
        if !current.is_empty() {
            runs.push(current);
        }

        runs
    }

    fn word(text: &str, token: &Token) -> String {
        text[token.start..token.end].to_lowercase()
    }

    /// Whether the word right before `start` is a title, e.g. `Dr.` or `Mrs`
    fn preceded_by_title(&self, text: &str, start: usize) -> bool {
        let before = text[..start].trim_end();
        let before = before.strip_suffix('.').unwrap_or(before);
        let word: String = before
            .chars()
            .rev()
            .take_while(|c| c.is_alphabetic())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        !word.is_empty() && self.titles.contains(&word.to_lowercase())
    }

    fn sentence_initial(text: &str, start: usize) -> bool {
        let before = text[..start].trim_end();
        before.is_empty() || before.ends_with(['.', '!', '?', ':', ';'])
    }

    fn sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }

    /// Person probability of a trimmed run
    fn person_score(&self, text: &str, run: &[Token], has_title: bool) -> f32 {
        let w = &self.weights;
        let words: Vec<String> = run.iter().map(|t| Self::word(text, t)).collect();
        let mut score = w.bias;

        if words.first().is_some_and(|first| self.given_names.contains(first)) {
            score += w.given_name;
        }
        let surname_slot = words.len() >= 2 || has_title;
        if surname_slot && words.last().is_some_and(|last| self.surnames.contains(last)) {
            score += w.surname;
        }
        if words.len() >= 2 {
            score += w.multi_token;
        }
        if has_title {
            score += w.title_prefix;
        }
        if !has_title && Self::sentence_initial(text, run[0].start) {
            score += w.sentence_initial;
        }
        let unknown = words
            .iter()
            .filter(|word| !self.given_names.contains(*word) && !self.surnames.contains(*word))
            .count();
        score += w.unknown_token * unknown as f32;

        Self::sigmoid(score)
    }

    /// Classify one run of tokens, `None` if it is not an entity
    fn classify_run(&self, text: &str, run: &[Token]) -> Option<RecognizedEntity> {
        let mut lo = 0;
        let mut hi = run.len();
        let mut has_title = false;

        while lo < hi {
            let word = Self::word(text, &run[lo]);
            if self.titles.contains(&word) {
                has_title = true;
            } else if !self.non_names.contains(&word) {
                break;
            }
            lo += 1;
        }
        while hi > lo && self.non_names.contains(&Self::word(text, &run[hi - 1])) {
            hi -= 1;
        }
        let run = &run[lo..hi];
        if run.is_empty() || run.len() > self.max_span_tokens {
            return None;
        }

        let span = Span::new(run[0].start, run[run.len() - 1].end);
        let surface = text[span.start..span.end].to_string();
        let words: Vec<String> = run.iter().map(|t| Self::word(text, t)).collect();

        if words.iter().any(|w| self.organizations.contains(w)) {
            return Some(RecognizedEntity {
                kind: EntityKind::Organization,
                span,
                text: surface,
                score: 1.0,
            });
        }
        if self.locations.contains(&words.join(" ")) {
            return Some(RecognizedEntity {
                kind: EntityKind::Location,
                span,
                text: surface,
                score: 1.0,
            });
        }

        let has_title = has_title || self.preceded_by_title(text, span.start);
        let score = self.person_score(text, run, has_title);
        (score > self.threshold).then(|| RecognizedEntity {
            kind: EntityKind::Person,
            span,
            text: surface,
            score,
        })
    }
}

impl EntityRecognizer for GazetteerModel {
    fn model_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        self.candidate_runs(text)
            .iter()
            .filter_map(|run| self.classify_run(text, run))
            .collect()
    }
}
