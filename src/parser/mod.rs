pub mod assemble;
pub mod blocks;
pub mod classify;
pub mod extract;
pub mod sections;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::language::Language;
use crate::record::CvRecord;
use classify::{Models, SectionClassifier};
use sections::SectionSpan;

/// Five-stage pipeline: text → blocks → labelled blocks → spans → record.
///
/// Holds one language's classifier; cheap to clone and safe to share
/// across threads.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<dyn SectionClassifier>,
    language: Language,
    settings: Arc<Settings>,
}

impl Pipeline {
    pub fn new(classifier: Arc<dyn SectionClassifier>, language: Language, settings: Settings) -> Self {
        Pipeline {
            classifier,
            language,
            settings: Arc::new(settings),
        }
    }

    pub fn for_language(models: &Models, language: Language, settings: Settings) -> Self {
        Self::new(models.classifier(language), language, settings)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse one document. Malformed or sparse input degrades to empty
    /// fields, never to an error.
    pub fn parse(&self, raw_text: &str) -> CvRecord {
        let spans = self.spans(raw_text);
        let extracted = extract::extract_all(&spans, self.language);
        let record = assemble::assemble(extracted, self.language);
        debug!(
            education = record.education.len(),
            experience = record.experience.len(),
            skills = record.skills.len(),
            languages = record.languages.len(),
            "assembled record"
        );
        record
    }

    /// The first three stages: segment, classify and group.
    pub fn spans(&self, raw_text: &str) -> Vec<SectionSpan> {
        let text = truncate_chars(raw_text, self.settings.max_input_chars);
        let blocks = blocks::segment(text, self.language, &self.settings.segmenter);
        let labeled = classify::classify_blocks(self.classifier.as_ref(), blocks);
        let spans = sections::group(&labeled, self.settings.grouping.noise_threshold);
        debug!(
            language = %self.language,
            blocks = labeled.len(),
            spans = spans.len(),
            "grouped sections"
        );
        spans
    }
}

/// At most `max` characters, cut at a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            warn!(limit = max, total = text.chars().count(), "input truncated");
            &text[..cut]
        }
        None => text,
    }
}

// ── Tests ──
