use std::sync::LazyLock;

use regex::Regex;

use super::content_lines;
use super::dates::find_date;
use super::ner::{after_name, segments, EntityRecognizer};
use crate::language::Language;
use crate::parser::blocks::strip_bullet;
use crate::record::Profile;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d \t().\-/]{5,}\d").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://\S+|www\.\S+|(?:[\w-]+\.)?(?:linkedin|github)\.com/\S+)").unwrap()
});
static YEAR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}\s*[-–—/]\s*(?:19|20)\d{2}$").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}[./-]\s*\d{1,2}[./-]\s*\d{1,2}\.?|\d{1,2}[./-]\d{1,2}[./-]\d{4})$").unwrap()
});
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:e-?mail|phone|tel|telephone|mobile|mobil|telefon|telefonszám|web|website|weboldal|linkedin|github|url|name|full name|név|teljes név|address|location|city|residence|cím|lakcím|lakhely|város)\s*:\s*",
    )
    .unwrap()
});

const MIN_PHONE_DIGITS: usize = 8;
const MAX_PHONE_DIGITS: usize = 13;

/// Contact fields, name and location, plus the remaining free text as summary.
pub fn extract(text: &str, language: Language) -> Profile {
    let lines = content_lines(text);
    let entities = EntityRecognizer::new(language).recognize(&lines);

    let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string()).unwrap_or_default();
    let url = find_url(text).unwrap_or_default();
    let phone = find_phone(text).unwrap_or_default();
    let name = entities.name.unwrap_or_default();
    let location = entities.location.unwrap_or_default();

    let summary = lines
        .iter()
        .filter_map(|l| summary_part(l, &name, &location))
        .collect::<Vec<_>>()
        .join(" ");

    Profile {
        name,
        email,
        phone,
        location,
        url,
        summary,
    }
}

fn find_url(text: &str) -> Option<String> {
    URL_RE.find_iter(text).map(|m| trim_url(m.as_str())).find(|u| !u.contains('@'))
}

fn trim_url(raw: &str) -> String {
    raw.trim_end_matches(['.', ',', ';', ')', '|']).to_string()
}

/// First digit run with 8 to 13 digits that is not a year range or a date.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
                && !YEAR_RANGE_RE.is_match(candidate)
                && !DATE_RE.is_match(candidate)
                && !is_whole_date(candidate)
        })
        .map(str::to_string)
}

/// `09/2024 - 12/2024` and the like, in either dialect.
fn is_whole_date(candidate: &str) -> bool {
    [Language::English, Language::Hungarian]
        .into_iter()
        .filter_map(|lang| find_date(candidate, lang))
        .any(|d| d.start == 0 && d.text == candidate)
}

/// What is left of a line once contact data, labels, the name and the
/// location are removed.
fn summary_part(line: &str, name: &str, location: &str) -> Option<String> {
    let line = strip_bullet(line);
    if LABEL_RE.is_match(line) {
        return None;
    }

    let mut stripped = EMAIL_RE.replace_all(line, " ").into_owned();
    stripped = URL_RE.replace_all(&stripped, " ").into_owned();
    if let Some(phone) = find_phone(&stripped) {
        stripped = stripped.replace(&phone, " ");
    }

    let kept: Vec<&str> = segments(&stripped)
        .map(|s| s.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '-' | '–')))
        .map(|s| if name.is_empty() { s } else { after_name(s, name) })
        .filter(|s| !s.is_empty() && *s != name && *s != location)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}

// ── Tests ──
