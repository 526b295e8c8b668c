use std::sync::LazyLock;

use regex::Regex;

use super::{content_lines, split_list_items};
use crate::language::Language;
use crate::parser::blocks::strip_bullet;
use crate::record::LanguageEntry;

static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^()]+?)\s*\((?P<prof>[^()]+)\)$").unwrap());
static SEPARATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^:\-–—()]+?)\s*(?:[-–—]|:)\s*(?P<prof>.+)$").unwrap());
static TRAILING_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<level>[^()]*?)\s*\((?P<inner>[^()]+)\)$").unwrap());
static CEFR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[abc][12]$").unwrap());

const KNOWN_LANGUAGES: &[&str] = &[
    "english", "hungarian", "german", "french", "spanish", "italian", "russian", "chinese",
    "japanese", "portuguese", "polish", "dutch", "romanian", "czech", "slovak", "croatian",
    "serbian", "ukrainian", "arabic", "turkish", "swedish", "korean", "angol", "magyar", "német",
    "francia", "spanyol", "olasz", "orosz", "kínai", "japán", "portugál", "lengyel", "holland",
    "román", "cseh", "szlovák", "horvát", "szerb", "ukrán", "arab", "török", "svéd", "koreai",
];

const EN_LEVELS: &[(&str, &str)] = &[
    ("native", "Native"),
    ("native speaker", "Native"),
    ("mother tongue", "Native"),
    ("bilingual", "Native"),
    ("fluent", "Fluent"),
    ("proficient", "Fluent"),
    ("full professional proficiency", "Fluent"),
    ("advanced", "Advanced"),
    ("upper intermediate", "Advanced"),
    ("upper-intermediate", "Advanced"),
    ("intermediate", "Intermediate"),
    ("conversational", "Intermediate"),
    ("working knowledge", "Intermediate"),
    ("professional working proficiency", "Intermediate"),
    ("basic", "Basic"),
    ("beginner", "Basic"),
    ("elementary", "Basic"),
    ("limited working proficiency", "Basic"),
];

const HU_LEVELS: &[(&str, &str)] = &[
    ("anyanyelv", "Anyanyelvi"),
    ("anyanyelvi", "Anyanyelvi"),
    ("anyanyelvű", "Anyanyelvi"),
    ("felsőfok", "Felsőfok"),
    ("felsőfokú", "Felsőfok"),
    ("középfok", "Középfok"),
    ("középfokú", "Középfok"),
    ("alapfok", "Alapfok"),
    ("alapfokú", "Alapfok"),
    ("folyékony", "Folyékony"),
    ("folyékonyan", "Folyékony"),
    ("haladó", "Haladó"),
    ("kezdő", "Kezdő"),
];

const MAX_NAME_WORDS: usize = 3;

/// Language entries from `name - level`, `name: level`, `name (level)` items
/// or a bare known language name.
pub fn extract(text: &str, language: Language) -> Vec<LanguageEntry> {
    content_lines(text)
        .into_iter()
        .flat_map(|line| split_list_items(strip_bullet(line)))
        .filter_map(|item| parse_item(item, language))
        .collect()
}

fn parse_item(item: &str, language: Language) -> Option<LanguageEntry> {
    let (name, proficiency) = if let Some(c) = SEPARATED_RE.captures(item) {
        (c["name"].trim().to_string(), separated_level(&c["prof"], language))
    } else if let Some(c) = PAREN_RE.captures(item) {
        (c["name"].trim().to_string(), normalize_proficiency(&c["prof"], language))
    } else if is_known_language(item) {
        (item.trim().to_string(), String::new())
    } else {
        return None;
    };

    if name.is_empty() || name.split_whitespace().count() > MAX_NAME_WORDS {
        return None;
    }
    Some(LanguageEntry {
        language: name,
        proficiency,
    })
}

/// `Fluent (C1)` keeps `Fluent`; a bare `(C1)` keeps the parenthesized level.
fn separated_level(raw: &str, language: Language) -> String {
    match TRAILING_PAREN_RE.captures(raw.trim()) {
        Some(c) if !c["level"].trim().is_empty() => normalize_proficiency(&c["level"], language),
        Some(c) => normalize_proficiency(&c["inner"], language),
        None => normalize_proficiency(raw, language),
    }
}

fn is_known_language(item: &str) -> bool {
    let lower = item.trim().to_lowercase();
    let lower = lower.strip_suffix(" nyelv").unwrap_or(&lower);
    KNOWN_LANGUAGES.contains(&lower)
}

/// Map a proficiency onto the dialect's vocabulary. CEFR codes are
/// upper-cased; anything unrecognized is returned verbatim.
pub fn normalize_proficiency(raw: &str, language: Language) -> String {
    let raw = raw.trim();
    if CEFR_RE.is_match(raw) {
        return raw.to_uppercase();
    }
    let lower = raw.to_lowercase();
    let key = lower
        .strip_suffix(" level")
        .or_else(|| lower.strip_suffix(" szint"))
        .unwrap_or(&lower)
        .trim();

    let hungarian: &[(&str, &str)] = match language {
        Language::Hungarian => HU_LEVELS,
        Language::English => &[],
    };
    hungarian
        .iter()
        .chain(EN_LEVELS)
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .unwrap_or_else(|| raw.to_string())
}

// ── Tests ──
