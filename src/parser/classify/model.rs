use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use super::SectionLabel;
use crate::error::ModelError;

/// Inclusive character n-gram sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LabelWeights {
    #[serde(default)]
    bias: f32,
    #[serde(default)]
    weights: BTreeMap<String, f32>,
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    char_ngrams: Option<NgramRange>,
    labels: BTreeMap<SectionLabel, LabelWeights>,
}

/// Validated per-label bias + sparse feature weights, one row per label in
/// `SectionLabel::ALL` order.
#[derive(Debug, Clone)]
pub struct WeightTable {
    name: String,
    char_ngrams: Option<NgramRange>,
    rows: Vec<LabelWeights>,
}

impl WeightTable {
    pub fn from_json(name: &str, json: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(json).map_err(|source| ModelError::Parse {
            model: name.to_string(),
            source,
        })?;
        Self::validate(name, file)
    }

    pub fn from_path(name: &str, path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(name, &json)
    }

    fn validate(name: &str, mut file: ModelFile) -> Result<Self, ModelError> {
        if let Some(range) = file.char_ngrams {
            if range.min == 0 || range.min > range.max {
                return Err(ModelError::EmptyNgramRange {
                    model: name.to_string(),
                });
            }
        }

        let mut rows = Vec::with_capacity(SectionLabel::ALL.len());
        for label in SectionLabel::ALL {
            let row = file.labels.remove(&label).ok_or_else(|| ModelError::MissingLabel {
                model: name.to_string(),
                label,
            })?;
            if !row.bias.is_finite() {
                return Err(non_finite(name, "bias"));
            }
            if let Some((feature, _)) = row.weights.iter().find(|(_, w)| !w.is_finite()) {
                return Err(non_finite(name, feature));
            }
            rows.push(row);
        }

        Ok(WeightTable {
            name: name.to_string(),
            char_ngrams: file.char_ngrams,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn char_ngrams(&self) -> Option<NgramRange> {
        self.char_ngrams
    }

    pub fn feature_count(&self) -> usize {
        self.rows.iter().map(|r| r.weights.len()).sum()
    }

    /// Raw linear score per label: bias plus the weights of every present feature.
    pub fn logits(&self, features: &BTreeSet<String>) -> [f32; 6] {
        let mut out = [0.0f32; 6];
        for (slot, row) in out.iter_mut().zip(&self.rows) {
            *slot = row.bias
                + features
                    .iter()
                    .filter_map(|f| row.weights.get(f))
                    .sum::<f32>();
        }
        out
    }
}

fn non_finite(model: &str, feature: &str) -> ModelError {
    ModelError::NonFiniteWeight {
        model: model.to_string(),
        feature: feature.to_string(),
    }
}

// ── Tests ──
