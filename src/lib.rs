//! Résumé text → canonical CV record.
//!
//! Raw text is segmented into blocks, each block is classified into a CV
//! section by a per-language model, noisy labels are smoothed into spans, and
//! section-specific extractors fill the record.

pub mod config;
pub mod error;
pub mod language;
pub mod parser;
pub mod record;

pub use config::Settings;
pub use error::{ModelError, SettingsError};
pub use language::{detect_language, Language};
pub use parser::classify::{Models, SectionClassifier, SectionLabel};
pub use parser::Pipeline;
pub use record::CvRecord;
