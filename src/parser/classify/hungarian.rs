use std::path::Path;

use super::features::extract_features;
use super::model::WeightTable;
use super::{pick_best, Classification, SectionClassifier};
use crate::error::ModelError;
use crate::parser::blocks::Block;

const BUILTIN_MODEL: &str = include_str!("../../../models/hu_linear.json");

/// Hungarian linear classifier over words and character n-grams with a
/// softmax over the six labels. The n-grams cover the inflected forms
/// (`tanulmányok`, `tanulmányaim`) a word list would miss.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    table: WeightTable,
}

impl LinearClassifier {
    pub fn builtin() -> Result<Self, ModelError> {
        Ok(LinearClassifier {
            table: WeightTable::from_json("hu_linear", BUILTIN_MODEL)?,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        Ok(LinearClassifier {
            table: WeightTable::from_path("hu_linear", path)?,
        })
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn probabilities(&self, text: &str) -> [f32; 6] {
        let features = extract_features(text, self.table.char_ngrams());
        softmax(self.table.logits(&features))
    }
}

impl SectionClassifier for LinearClassifier {
    fn classify(&self, block: &Block) -> Classification {
        pick_best(&self.probabilities(&block.text))
    }
}

fn softmax(logits: [f32; 6]) -> [f32; 6] {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp = logits.map(|l| (l - max).exp());
    let total: f32 = exp.iter().sum();
    exp.map(|e| e / total)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::parser::classify::SectionLabel;

    fn label_of(text: &str) -> SectionLabel {
        let block = Block {
            index: 0,
            text: text.to_string(),
            language: Language::Hungarian,
        };
        LinearClassifier::builtin().unwrap().classify(&block).label
    }

    #[test]
    fn headings() {
        assert_eq!(label_of("Tanulmányok"), SectionLabel::Education);
        assert_eq!(label_of("Szakmai tapasztalat"), SectionLabel::Experience);
        assert_eq!(label_of("Készségek"), SectionLabel::Skills);
        assert_eq!(label_of("Nyelvtudás"), SectionLabel::Languages);
        assert_eq!(label_of("Elérhetőség"), SectionLabel::Profile);
        assert_eq!(label_of("Hobbi"), SectionLabel::Other);
    }

    #[test]
    fn inflected_headings_via_ngrams() {
        assert_eq!(label_of("Tanulmányaim"), SectionLabel::Education);
        assert_eq!(label_of("Munkatapasztalatok"), SectionLabel::Experience);
        assert_eq!(label_of("Nyelvismeretek"), SectionLabel::Languages);
    }

    #[test]
    fn content_blocks() {
        assert_eq!(
            label_of("angol - felsőfok, német - középfok"),
            SectionLabel::Languages
        );
        assert_eq!(
            label_of("Szoftverfejlesztő, Példa Kft.\n2019 - jelenleg\n• Számlázó rendszer fejlesztése"),
            SectionLabel::Experience
        );
        assert_eq!(
            label_of("Budapesti Műszaki Egyetem\nMérnökinformatikus BSc\n2014 - 2018"),
            SectionLabel::Education
        );
    }

    #[test]
    fn probabilities_sum_to_one() {
        let p = LinearClassifier::builtin().unwrap().probabilities("Nyelvtudás");
        let sum: f32 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}
