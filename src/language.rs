use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document language. Selects the classifier variant and the extractor dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hu")]
    Hungarian,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hungarian => "hu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag {0:?} (expected \"en\" or \"hu\")")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "hu" | "hun" | "hungarian" | "magyar" => Ok(Language::Hungarian),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

const HUNGARIAN_INDICATORS: &[&str] = &[
    // Function words; "a" and "is" are English words too
    " és ", " az ", " egy ", " hogy ", " nem ", " mint ", " vagy ",
    " valamint ", " között ", " során ", " alatt ",
    // CV vocabulary
    "tapasztalat", "tanulmány", "végzettség", "készség", "nyelvtudás", "nyelvismeret",
    "anyanyelv", "középfok", "felsőfok", "alapfok", "egyetem", "főiskola", "gimnázium",
    "munkahely", "munkakör", "feladat", "fejlesztő", "mérnök", "születési", "telefon",
    "jelenleg", "napjainkig", "szakmai", "önéletrajz", "elérhetőség", "cím:",
];

const ENGLISH_INDICATORS: &[&str] = &[
    " the ", " and ", " of ", " for ", " with ", " to ", " in ", " at ", " on ",
    " from ", " was ", " were ", " have ", " has ", " an ", " she ", " he ", " her ", " his ",
    "experience", "education", "skills", "languages", "university", "college",
    "responsible", "developed", "managed", "present", "summary", "profile",
    "fluent", "native", "intermediate", "bachelor", "master",
];

/// Pick `en` or `hu` for a document whose language was not supplied.
///
/// Keyword frequency plus a bonus for the double-acute vowels (ő, ű) that
/// only Hungarian uses. English wins ties and very short inputs.
pub fn detect_language(text: &str) -> Language {
    if text.trim().chars().count() < 20 {
        return Language::English;
    }

    let lower = format!(" {} ", text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" "));
    let hungarian = count_indicators(&lower, HUNGARIAN_INDICATORS) + count_hungarian_letters(&lower);
    let english = count_indicators(&lower, ENGLISH_INDICATORS);

    if hungarian > english {
        Language::Hungarian
    } else {
        Language::English
    }
}

fn count_indicators(lower_text: &str, indicators: &[&str]) -> u32 {
    indicators
        .iter()
        .map(|indicator| lower_text.matches(indicator).count() as u32)
        .sum()
}

fn count_hungarian_letters(lower_text: &str) -> u32 {
    let strong = lower_text.chars().filter(|c| matches!(c, 'ő' | 'ű')).count() as u32;
    let weak = lower_text
        .chars()
        .filter(|c| matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ö' | 'ú' | 'ü'))
        .count() as u32;
    strong * 2 + weak / 3
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("HU".parse::<Language>().unwrap(), Language::Hungarian);
        assert_eq!("magyar".parse::<Language>().unwrap(), Language::Hungarian);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Hungarian).unwrap(), "\"hu\"");
        assert_eq!(Language::English.to_string(), "en");
    }

    #[test]
    fn detects_hungarian_cv() {
        let text = "Szakmai tapasztalat\nSzoftverfejlesztő, Példa Kft.\n2019 - jelenleg\n\
                    Tanulmányok\nBudapesti Műszaki Egyetem\nNyelvtudás\nangol - felsőfok";
        assert_eq!(detect_language(text), Language::Hungarian);
    }

    #[test]
    fn detects_english_cv() {
        let text = "Work Experience\nSoftware Engineer at ACME Corp\nJan 2019 - Present\n\
                    Responsible for the billing platform and the data pipeline.\nEducation\nACME University";
        assert_eq!(detect_language(text), Language::English);
    }

    #[test]
    fn article_heavy_english_prose_stays_english() {
        let text = "Jane Doe\nJane is a backend developer. She is a team player and is a quick learner.\n\
                    Python, SQL, Go";
        assert_eq!(detect_language(text), Language::English);
    }

    #[test]
    fn short_text_defaults_to_english() {
        assert_eq!(detect_language("Név"), Language::English);
        assert_eq!(detect_language(""), Language::English);
    }
}
