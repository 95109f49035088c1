//! Wire types for classification results
//!
//! Inside the crate spans are byte offsets. On the wire they are character
//! offsets, so clients indexing the string by character land on the same
//! text.

use crate::masking::{MaskedEmail, PiiEntity, PiiLabel};
use serde::{Deserialize, Serialize};

/// One masked entity as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedEntity {
    /// `[start, end)` character offsets into the preprocessed email text
    pub position: [usize; 2],
    pub classification: PiiLabel,
    pub entity: String,
}

/// Full result of triaging one email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// Email body exactly as received
    pub input_email_body: String,
    /// Entities sorted by start offset
    pub list_of_masked_entities: Vec<MaskedEntity>,
    pub masked_email: String,
    pub category_of_the_email: String,
}

/// Masking-only result, as printed by the `mask` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingOutcome {
    pub list_of_masked_entities: Vec<MaskedEntity>,
    pub masked_email: String,
}

impl MaskingOutcome {
    /// Convert byte spans of `masked_input` to character spans
    pub fn new(masked_input: &str, masked: MaskedEmail) -> Self {
        Self {
            list_of_masked_entities: wire_entities(masked_input, masked.entities),
            masked_email: masked.masked_text,
        }
    }
}

/// Convert entities found in `text` to their wire form with character offsets
pub fn wire_entities(text: &str, entities: Vec<PiiEntity>) -> Vec<MaskedEntity> {
    let offsets = CharOffsets::new(text);
    entities.into_iter().map(|e| offsets.to_wire(e)).collect()
}

impl ClassificationOutcome {
    /// Assemble the outcome, converting byte spans of `masked_input` to character spans
    pub fn new(
        input_email_body: String,
        masked_input: &str,
        masked: MaskedEmail,
        category: String,
    ) -> Self {
        let list_of_masked_entities = wire_entities(masked_input, masked.entities);

        Self {
            input_email_body,
            list_of_masked_entities,
            masked_email: masked.masked_text,
            category_of_the_email: category,
        }
    }
}

/// Byte offset to character offset lookup for one text
struct CharOffsets {
    /// Byte offset of every character, plus the text length
    boundaries: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { boundaries }
    }

    /// Character index of a byte offset; offsets inside a character round down
    fn char_index(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    fn to_wire(&self, entity: PiiEntity) -> MaskedEntity {
        MaskedEntity {
            position: [
                self.char_index(entity.position.start),
                self.char_index(entity.position.end),
            ],
            classification: entity.classification,
            entity: entity.entity,
        }
    }
}
