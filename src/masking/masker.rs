//! Span reconciliation and masking
//!
//! Algorithm contract:
//!
//! 1. The pattern and name entities are concatenated into one working list.
//!    Nothing is deduplicated or merged, including identical or nested spans.
//! 2. A copy is ordered by start offset, descending. On equal starts the
//!    longer span goes first; remaining ties keep discovery order.
//! 3. The text is rewritten walking that copy strictly right to left, each
//!    span replaced by `[label]` in the progressively mutated text. A
//!    replacement never moves text that starts before it, so every span that
//!    starts earlier is still addressed correctly when its turn comes. Any
//!    other traversal order invalidates offsets.
//! 4. The returned list is the untouched union ordered by start, ascending.
//!    Its offsets index the original text, never the masked text.
//!
//! Overlapping spans are all masked. When an earlier-starting span reaches
//! into text that was already replaced, its range is clamped to the current
//! text and to character boundaries, which can leave malformed bracket
//! sequences. That is a known limitation, not corrected here.

use crate::masking::models::{MaskedEmail, PiiEntity};
use std::cmp::Reverse;

/// Mask `text` with the union of both detectors' entities
///
/// Callers must have checked every entity against `text` (see
/// [`crate::masking::engine::MaskingEngine`]); out-of-range spans are
/// clamped rather than rejected here.
pub fn mask_entities(
    text: &str,
    pattern_entities: Vec<PiiEntity>,
    name_entities: Vec<PiiEntity>,
) -> MaskedEmail {
    let mut entities = pattern_entities;
    entities.extend(name_entities);

    let masked_text = rewrite_right_to_left(text, &entities);
    sort_by_position(&mut entities);

    MaskedEmail {
        masked_text,
        entities,
    }
}

/// Order in which spans are rewritten: start descending, longer span first
pub fn masking_order(entities: &[PiiEntity]) -> Vec<&PiiEntity> {
    let mut order: Vec<&PiiEntity> = entities.iter().collect();
    // stable: equal (start, end) keep discovery order
    order.sort_by_key(|e| (Reverse(e.position.start), Reverse(e.position.end)));
    order
}

/// Replace every entity span with its placeholder, rightmost span first
pub fn rewrite_right_to_left(text: &str, entities: &[PiiEntity]) -> String {
    let mut masked = text.to_string();

    for entity in masking_order(entities) {
        let (start, end) = clamp_range(&masked, entity.position.start, entity.position.end);
        masked.replace_range(start..end, &entity.classification.placeholder());
    }

    masked
}

/// Stable ascending sort by start offset
pub fn sort_by_position(entities: &mut [PiiEntity]) {
    entities.sort_by_key(|e| e.position.start);
}

/// Clamp `[start, end)` into `text` and widen it onto character boundaries
fn clamp_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let len = text.len();
    let mut start = start.min(len);
    let mut end = end.min(len).max(start);

    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }

    (start, end)
}
