//! Person-name and location recognition for the profile header.
//!
//! Rules over a small place gazetteer: labelled values (`Name:`, `Cím:`)
//! win, then shape rules over the first lines of the section.

use std::sync::LazyLock;

use regex::Regex;

use super::{has_job_indicator, heading_rest};
use crate::language::Language;
use crate::parser::classify::features::is_name_like;

const CITIES: &[&str] = &[
    "budapest", "debrecen", "szeged", "miskolc", "pécs", "győr", "nyíregyháza", "kecskemét",
    "székesfehérvár", "szombathely", "szolnok", "eger", "veszprém", "sopron", "london", "berlin",
    "vienna", "wien", "bécs", "paris", "párizs", "new york", "san francisco", "boston", "seattle",
    "chicago", "austin", "toronto", "amsterdam", "munich", "münchen", "prague", "prága", "warsaw",
    "varsó", "bratislava", "pozsony", "dublin", "zurich", "zürich", "madrid", "barcelona", "rome",
    "róma", "milan", "stockholm", "copenhagen", "oslo", "helsinki", "lisbon", "brussels",
    "manchester", "edinburgh", "los angeles", "sydney", "singapore", "bucharest", "kolozsvár",
    "cluj-napoca",
];

const COUNTRIES: &[&str] = &[
    "hungary", "magyarország", "germany", "németország", "austria", "ausztria", "united kingdom",
    "uk", "usa", "united states", "france", "franciaország", "netherlands", "hollandia", "romania",
    "románia", "slovakia", "szlovákia", "poland", "lengyelország", "czech republic", "csehország",
    "spain", "spanyolország", "italy", "olaszország", "canada", "ireland", "írország",
    "switzerland", "svájc", "sweden", "svédország",
];

static PLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut places: Vec<&str> = CITIES.iter().chain(COUNTRIES).copied().collect();
    places.sort_by_key(|p| std::cmp::Reverse(p.len()));
    Regex::new(&format!(r"(?i)\b(?:{})\b", places.join("|"))).unwrap()
});

static NAME_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:full\s+name|name|teljes\s+név|név)\s*:\s*(.+)$").unwrap());
static LOCATION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:address|location|city|residence|cím|lakcím|lakhely|város)\s*:\s*(.+)$")
        .unwrap()
});

/// Lines scanned for an unlabelled name.
const NAME_WINDOW: usize = 6;
const MAX_LOCATION_WORDS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities {
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct EntityRecognizer {
    language: Language,
}

impl EntityRecognizer {
    pub fn new(language: Language) -> Self {
        EntityRecognizer { language }
    }

    pub fn recognize(&self, lines: &[&str]) -> Entities {
        let name = self.person_name(lines);
        let location = self.location(lines, name.as_deref());
        Entities { name, location }
    }

    fn person_name(&self, lines: &[&str]) -> Option<String> {
        if let Some(name) = labelled(lines, &NAME_LABEL_RE) {
            return Some(name);
        }
        lines
            .iter()
            .take(NAME_WINDOW)
            .flat_map(|l| segments(l))
            .flat_map(|seg| std::iter::once(seg).chain(seg.split_once(',').map(|(head, _)| head.trim())))
            .find(|seg| {
                is_name_like(seg)
                    && heading_rest(seg).is_none()
                    && !has_job_indicator(seg, self.language)
                    && !is_place(seg)
            })
            .map(str::to_string)
    }

    fn location(&self, lines: &[&str], name: Option<&str>) -> Option<String> {
        if let Some(loc) = labelled(lines, &LOCATION_LABEL_RE) {
            return Some(loc);
        }
        lines
            .iter()
            .flat_map(|l| segments(l))
            .map(|seg| name.map_or(seg, |n| after_name(seg, n)))
            .find(|seg| {
                is_place(seg)
                    && seg.split_whitespace().count() <= MAX_LOCATION_WORDS
                    && !seg.contains('@')
                    && !seg.contains("://")
            })
            .map(str::to_string)
    }
}

/// Whether the text mentions a gazetteer city or country.
pub fn is_place(text: &str) -> bool {
    PLACE_RE.is_match(text)
}

fn labelled(lines: &[&str], re: &Regex) -> Option<String> {
    lines.iter().find_map(|l| {
        re.captures(l)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// `Jane Doe, Berlin` → `Berlin`; anything not led by `name,` is returned as is.
pub fn after_name<'a>(segment: &'a str, name: &str) -> &'a str {
    segment
        .strip_prefix(name)
        .and_then(|rest| rest.trim_start().strip_prefix(','))
        .map_or(segment, str::trim)
}

/// Parts of a header line separated by `|`, `•` or `·`.
pub fn segments(line: &str) -> impl Iterator<Item = &str> {
    line.split(['|', '•', '·'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(text: &str, language: Language) -> Entities {
        let lines: Vec<&str> = text.lines().collect();
        EntityRecognizer::new(language).recognize(&lines)
    }

    #[test]
    fn name_from_top_lines() {
        let e = recognize("Jane Doe\nSoftware Engineer\nBerlin, Germany", Language::English);
        assert_eq!(e.name.as_deref(), Some("Jane Doe"));
        assert_eq!(e.location.as_deref(), Some("Berlin, Germany"));
    }

    #[test]
    fn labels_win() {
        let e = recognize(
            "Curriculum Vitae\nName: John Smith\nAddress: 12 Baker Street, London",
            Language::English,
        );
        assert_eq!(e.name.as_deref(), Some("John Smith"));
        assert_eq!(e.location.as_deref(), Some("12 Baker Street, London"));
    }

    #[test]
    fn job_titles_and_places_are_not_names() {
        let e = recognize("Senior Data Analyst\nNew York\nMary Major", Language::English);
        assert_eq!(e.name.as_deref(), Some("Mary Major"));
        assert_eq!(e.location.as_deref(), Some("New York"));
    }

    #[test]
    fn hungarian_labels() {
        let e = recognize("Név: Kovács Anna\nLakcím: 1117 Budapest, Fő utca 1.", Language::Hungarian);
        assert_eq!(e.name.as_deref(), Some("Kovács Anna"));
        assert_eq!(e.location.as_deref(), Some("1117 Budapest, Fő utca 1."));
    }

    #[test]
    fn segments_of_a_contact_line() {
        let e = recognize("Kovács Anna | Debrecen | anna@example.hu", Language::Hungarian);
        assert_eq!(e.name.as_deref(), Some("Kovács Anna"));
        assert_eq!(e.location.as_deref(), Some("Debrecen"));
    }

    #[test]
    fn name_and_place_on_one_comma_line() {
        let e = recognize("Jane Doe, Berlin, Germany\njane@example.com", Language::English);
        assert_eq!(e.name.as_deref(), Some("Jane Doe"));
        assert_eq!(e.location.as_deref(), Some("Berlin, Germany"));
    }

    #[test]
    fn nothing_found() {
        assert_eq!(recognize("", Language::English), Entities::default());
        assert_eq!(
            recognize("i write code\n+1 555 123 4567", Language::English),
            Entities::default()
        );
    }
}
