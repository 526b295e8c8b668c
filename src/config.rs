use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::SettingsError;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "cvparse.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Longer inputs are truncated (at a char boundary) before segmentation.
    pub max_input_chars: usize,
    pub segmenter: SegmenterSettings,
    pub grouping: GroupingSettings,
    pub models: ModelPaths,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmenterSettings {
    pub max_block_lines: usize,
    pub max_block_chars: usize,
    pub split_columns: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupingSettings {
    /// Single-block spans below this confidence are smoothing candidates.
    pub noise_threshold: f32,
}

/// Optional model files overriding the compiled-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    pub english: Option<PathBuf>,
    pub hungarian: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_input_chars: 100_000,
            segmenter: SegmenterSettings::default(),
            grouping: GroupingSettings::default(),
            models: ModelPaths::default(),
        }
    }
}

impl Default for SegmenterSettings {
    fn default() -> Self {
        SegmenterSettings {
            max_block_lines: 12,
            max_block_chars: 1200,
            split_columns: true,
        }
    }
}

impl Default for GroupingSettings {
    fn default() -> Self {
        GroupingSettings {
            noise_threshold: 0.5,
        }
    }
}

impl Settings {
    /// Layer an optional TOML file under `CVPARSE__*` environment variables.
    ///
    /// An explicit `path` must exist; otherwise `cvparse.toml` is read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };
        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("CVPARSE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = self.grouping.noise_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(SettingsError::Threshold(t));
        }
        if self.max_input_chars == 0 {
            return Err(SettingsError::ZeroLimit("max_input_chars"));
        }
        if self.segmenter.max_block_lines == 0 {
            return Err(SettingsError::ZeroLimit("segmenter.max_block_lines"));
        }
        if self.segmenter.max_block_chars == 0 {
            return Err(SettingsError::ZeroLimit("segmenter.max_block_chars"));
        }
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.grouping.noise_threshold, 0.5);
        assert_eq!(s.max_input_chars, 100_000);
        assert_eq!(s.segmenter.max_block_lines, 12);
        assert!(s.segmenter.split_columns);
        assert!(s.models.english.is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults_partially() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(f, "[grouping]\nnoise_threshold = 0.35\n\n[segmenter]\nmax_block_lines = 6").unwrap();
        let s = Settings::load(Some(f.path())).unwrap();
        assert_eq!(s.grouping.noise_threshold, 0.35);
        assert_eq!(s.segmenter.max_block_lines, 6);
        assert_eq!(s.segmenter.max_block_chars, 1200);
        assert_eq!(s.max_input_chars, 100_000);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(f, "[grouping]\nnoise_threshold = 1.5").unwrap();
        assert!(matches!(
            Settings::load(Some(f.path())),
            Err(SettingsError::Threshold(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("/definitely/not/here/cvparse.toml");
        assert!(matches!(Settings::load(Some(missing)), Err(SettingsError::Source(_))));
    }

    #[test]
    fn zero_limits_rejected() {
        let mut s = Settings::default();
        s.segmenter.max_block_lines = 0;
        assert!(matches!(s.validate(), Err(SettingsError::ZeroLimit(_))));
    }
}
