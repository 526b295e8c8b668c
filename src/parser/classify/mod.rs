pub mod english;
pub mod features;
pub mod hungarian;
pub mod model;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::blocks::Block;
use crate::config::ModelPaths;
use crate::error::ModelError;
use crate::language::Language;
pub use english::TextCategorizer;
pub use hungarian::LinearClassifier;

/// The closed set of CV section categories. Declaration order is the
/// tie-break order for equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionLabel {
    Profile,
    Education,
    Experience,
    Skills,
    Languages,
    Other,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 6] = [
        SectionLabel::Profile,
        SectionLabel::Education,
        SectionLabel::Experience,
        SectionLabel::Skills,
        SectionLabel::Languages,
        SectionLabel::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionLabel::Profile => "PROFILE",
            SectionLabel::Education => "EDUCATION",
            SectionLabel::Experience => "EXPERIENCE",
            SectionLabel::Skills => "SKILLS",
            SectionLabel::Languages => "LANGUAGES",
            SectionLabel::Other => "OTHER",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: SectionLabel,
    /// In [0, 1].
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledBlock {
    pub block: Block,
    pub label: SectionLabel,
    pub confidence: f32,
}

/// Block-local section classifier. Implementations are read-only after
/// construction and shared across threads.
pub trait SectionClassifier: Send + Sync {
    fn classify(&self, block: &Block) -> Classification;
}

/// Label every block, preserving order.
pub fn classify_blocks(classifier: &dyn SectionClassifier, blocks: Vec<Block>) -> Vec<LabeledBlock> {
    blocks
        .into_iter()
        .map(|block| {
            let Classification { label, confidence } = classifier.classify(&block);
            LabeledBlock {
                block,
                label,
                confidence: confidence.clamp(0.0, 1.0),
            }
        })
        .collect()
}

/// Arg-max over per-label scores in `SectionLabel::ALL` order; first wins ties.
pub(crate) fn pick_best(scores: &[f32; 6]) -> Classification {
    let mut best = 0;
    for i in 1..scores.len() {
        if scores[i] > scores[best] {
            best = i;
        }
    }
    Classification {
        label: SectionLabel::ALL[best],
        confidence: scores[best],
    }
}

/// Both language models, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Models {
    pub english: Arc<TextCategorizer>,
    pub hungarian: Arc<LinearClassifier>,
}

impl Models {
    /// The compiled-in default models.
    pub fn builtin() -> Result<Self, ModelError> {
        Self::load(&ModelPaths::default())
    }

    /// Load each model from its configured path, falling back to the built-in one.
    pub fn load(paths: &ModelPaths) -> Result<Self, ModelError> {
        let english = match &paths.english {
            Some(path) => TextCategorizer::from_path(path)?,
            None => TextCategorizer::builtin()?,
        };
        info!(
            model = english.table().name(),
            features = english.table().feature_count(),
            source = ?paths.english,
            "loaded English classifier"
        );

        let hungarian = match &paths.hungarian {
            Some(path) => LinearClassifier::from_path(path)?,
            None => LinearClassifier::builtin()?,
        };
        info!(
            model = hungarian.table().name(),
            features = hungarian.table().feature_count(),
            source = ?paths.hungarian,
            "loaded Hungarian classifier"
        );

        Ok(Models {
            english: Arc::new(english),
            hungarian: Arc::new(hungarian),
        })
    }

    pub fn classifier(&self, language: Language) -> Arc<dyn SectionClassifier> {
        match language {
            Language::English => self.english.clone(),
            Language::Hungarian => self.hungarian.clone(),
        }
    }
}

// ── Tests ──
