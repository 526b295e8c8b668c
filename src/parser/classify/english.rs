use std::path::Path;

use super::features::extract_features;
use super::model::WeightTable;
use super::{pick_best, Classification, SectionClassifier};
use crate::error::ModelError;
use crate::parser::blocks::Block;

const BUILTIN_MODEL: &str = include_str!("../../../models/en_textcat.json");

/// English text categorizer: each label scored independently through a
/// sigmoid, so scores are multi-label and need not sum to one.
#[derive(Debug, Clone)]
pub struct TextCategorizer {
    table: WeightTable,
}

impl TextCategorizer {
    pub fn builtin() -> Result<Self, ModelError> {
        Ok(TextCategorizer {
            table: WeightTable::from_json("en_textcat", BUILTIN_MODEL)?,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        Ok(TextCategorizer {
            table: WeightTable::from_path("en_textcat", path)?,
        })
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn scores(&self, text: &str) -> [f32; 6] {
        let features = extract_features(text, self.table.char_ngrams());
        self.table.logits(&features).map(sigmoid)
    }
}

impl SectionClassifier for TextCategorizer {
    fn classify(&self, block: &Block) -> Classification {
        pick_best(&self.scores(&block.text))
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

// ── Tests ──
