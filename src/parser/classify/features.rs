use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::model::NgramRange;
use crate::parser::blocks::{starts_with_bullet, strip_bullet};

// ── Shape patterns ──

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(\.[\w-]+)+").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d \t().-]{6,}\d").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(https?://|www\.|linkedin\.com/|github\.com/)").unwrap()
});
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(19|20)\d{2}\.?\S*\s*(-|–|—|to|until)\s*\S*\s*((19|20)\d{2}|present|current|now|today|ongoing|jelenleg|napjainkig|jelen|folyamatban)",
    )
    .unwrap()
});
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());
static GPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(gpa|cgpa|grade point average|átlag|tanulmányi átlag)\b").unwrap()
});
static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(b\.?\s?sc|m\.?\s?sc|b\.?\s?a|m\.?\s?a|ph\.?\s?d|mba|bachelor|master|doctor(ate)?|diploma|alapképzés|mesterképzés|szakirány|okleveles)\b",
    )
    .unwrap()
});

/// Binary feature set of a block, sorted so downstream sums are order-stable.
///
/// `w:` unigrams, `b:` bigrams, `c:` boundary-marked character n-grams (only
/// when a range is given) and `__shape__` layout features.
pub fn extract_features(text: &str, char_ngrams: Option<NgramRange>) -> BTreeSet<String> {
    let mut features = BTreeSet::new();
    let tokens = tokenize(text);

    for token in &tokens {
        features.insert(format!("w:{token}"));
        if let Some(range) = char_ngrams {
            insert_char_ngrams(&mut features, token, range);
        }
    }
    for pair in tokens.windows(2) {
        features.insert(format!("b:{}_{}", pair[0], pair[1]));
    }
    for shape in shapes(text) {
        features.insert(shape.to_string());
    }

    features
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn insert_char_ngrams(features: &mut BTreeSet<String>, token: &str, range: NgramRange) {
    let marked: Vec<char> = std::iter::once('<')
        .chain(token.chars())
        .chain(std::iter::once('>'))
        .collect();
    for n in range.min..=range.max {
        if n > marked.len() {
            break;
        }
        for gram in marked.windows(n) {
            features.insert(format!("c:{}", gram.iter().collect::<String>()));
        }
    }
}

fn shapes(text: &str) -> Vec<&'static str> {
    let mut out = Vec::new();
    if EMAIL_RE.is_match(text) {
        out.push("__email__");
    }
    if looks_like_phone(text) {
        out.push("__phone__");
    }
    if URL_RE.is_match(text) {
        out.push("__url__");
    }
    if DATE_RANGE_RE.is_match(text) {
        out.push("__date_range__");
    }
    if YEAR_RE.is_match(text) {
        out.push("__year__");
    }
    if text.lines().any(starts_with_bullet) {
        out.push("__bullet__");
    }
    if GPA_RE.is_match(text) {
        out.push("__gpa__");
    }
    if DEGREE_RE.is_match(text) {
        out.push("__degree__");
    }
    if is_comma_list(text) {
        out.push("__comma_list__");
    }
    if is_name_like(text.lines().next().unwrap_or("")) {
        out.push("__name_like__");
    }
    out
}

fn looks_like_phone(text: &str) -> bool {
    PHONE_RE.find_iter(text).any(|m| {
        let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
        (8..=13).contains(&digits) && !DATE_RANGE_RE.is_match(m.as_str())
    })
}

fn is_comma_list(text: &str) -> bool {
    let lines: Vec<&str> = text.lines().map(strip_bullet).collect();
    let separators = lines
        .iter()
        .flat_map(|l| l.chars())
        .filter(|c| matches!(c, ',' | ';' | '|' | '•' | '·'))
        .count();
    let items: Vec<&str> = lines
        .iter()
        .flat_map(|l| l.split(|c: char| matches!(c, ',' | ';' | '|' | '•' | '·')))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if separators < 2 || items.len() < 3 {
        return false;
    }
    let words: usize = items.iter().map(|i| i.split_whitespace().count()).sum();
    words <= items.len() * 3
}

/// Two to four capitalized alphabetic words, e.g. "Jane Doe" or "Kovács Anna Mária".
pub fn is_name_like(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            let mut chars = w.chars();
            chars.next().is_some_and(char::is_uppercase)
                && chars.all(|c| c.is_alphabetic() || c == '-' || c == '\'')
        })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_bigrams() {
        let f = extract_features("Work Experience", None);
        assert!(f.contains("w:work"));
        assert!(f.contains("w:experience"));
        assert!(f.contains("b:work_experience"));
        assert!(!f.iter().any(|x| x.starts_with("c:")));
    }

    #[test]
    fn char_ngrams_carry_boundaries() {
        let f = extract_features("Nyelvtudás", Some(NgramRange { min: 3, max: 4 }));
        assert!(f.contains("c:<ny"));
        assert!(f.contains("c:nyel"));
        assert!(f.contains("c:dás>"));
    }

    #[test]
    fn shape_features() {
        let f = extract_features("jane@example.com\n+36 30 123 4567\nwww.example.com", None);
        assert!(f.contains("__email__"));
        assert!(f.contains("__phone__"));
        assert!(f.contains("__url__"));

        let f = extract_features("Engineer, ACME Inc.\nJan 2019 - Present\n• Built things", None);
        assert!(f.contains("__date_range__"));
        assert!(f.contains("__year__"));
        assert!(f.contains("__bullet__"));
        assert!(!f.contains("__phone__"));
        assert!(!f.contains("__comma_list__"));

        let f = extract_features("B.Sc. Computer Science\nGPA: 3.8", None);
        assert!(f.contains("__degree__"));
        assert!(f.contains("__gpa__"));

        assert!(extract_features("Python, SQL, Docker, Git", None).contains("__comma_list__"));
        assert!(extract_features("Jane Doe\nBerlin", None).contains("__name_like__"));
    }

    #[test]
    fn year_range_is_not_a_phone() {
        assert!(!looks_like_phone("2016 - 2020"));
        assert!(looks_like_phone("Tel: +1 (555) 123-4567"));
    }

    #[test]
    fn name_like_lines() {
        assert!(is_name_like("Jane Doe"));
        assert!(is_name_like("Kovács Anna"));
        assert!(!is_name_like("Jane"));
        assert!(!is_name_like("jane doe"));
        assert!(!is_name_like("Jane Doe 2020"));
    }
}
