use std::sync::LazyLock;

use regex::Regex;

use crate::language::Language;

const EN_MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const HU_MONTH: &str = r"(?:január|február|március|április|május|június|július|augusztus|szeptember|október|november|december|jan|febr?|márc?|ápr|máj|jún|júl|aug|szept?|okt|nov|dec)\.?";
const YEAR: &str = r"(?:19|20)\d{2}";

static EN_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let point = format!(r"(?:{EN_MONTH}\s+{YEAR}|\d{{1,2}}/{YEAR}|{YEAR}[/.]\d{{1,2}}|{YEAR})");
    let open = r"(?:present|current|now|today|ongoing)";
    Regex::new(&format!(
        r"(?i)\b(?:(?:since|from)\s+)?{point}(?:\s*(?:[-–—]|\bto\b|\buntil\b)\s*(?:{point}|{open}))?\b"
    ))
    .unwrap()
});

static HU_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let point = format!(
        r"(?:{YEAR}\.\s*{HU_MONTH}|{YEAR}\.\s*\d{{1,2}}\.?|\d{{1,2}}/{YEAR}|{YEAR}\.?)"
    );
    let open = r"(?:jelenleg|napjainkig|jelen|folyamatban|present|current)";
    Regex::new(&format!(
        r"(?i)\b{point}(?:\s*[-–—]\s*(?:{point}|{open})|\s*-?\s*t[óő]l(?:\s+(?:{point}|{open})(?:-?ig)?)?)?"
    ))
    .unwrap()
});

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(YEAR).unwrap());

const OPEN_WORDS: &[&str] = &[
    "present", "current", "now", "today", "ongoing", "jelenleg", "napjainkig", "jelen", "folyamatban",
];

/// A date or date range found in a line, kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> DateMatch<'a> {
    /// The line with the date cut out, as the text before and after it.
    pub fn surrounding(&self, line: &'a str) -> (&'a str, &'a str) {
        (&line[..self.start], &line[self.end..])
    }
}

/// First date in `line` under the dialect's grammar.
pub fn find_date(line: &str, language: Language) -> Option<DateMatch<'_>> {
    let re = match language {
        Language::English => &*EN_DATE_RE,
        Language::Hungarian => &*HU_DATE_RE,
    };
    re.find_iter(line)
        .find(|m| {
            // reject years glued to longer digit runs (phone numbers, ids)
            !line[m.end()..].starts_with(|c: char| c.is_ascii_digit())
        })
        .map(|m| DateMatch {
            text: m.as_str().trim_end(),
            start: m.start(),
            end: m.start() + m.as_str().trim_end().len(),
        })
}

/// Date that can open an entry: only on header-like lines (no bullet, at
/// most twelve words).
pub fn header_date(line: &str, language: Language) -> Option<DateMatch<'_>> {
    if crate::parser::blocks::starts_with_bullet(line) || line.split_whitespace().count() > 12 {
        return None;
    }
    find_date(line, language)
}

/// `Jan 2019 - Present`, `since 2020`, `2019-től` and the like.
pub fn is_open_ended(date: &str) -> bool {
    let lower = date.to_lowercase();
    if lower.starts_with("since") || lower.starts_with("from") {
        return true;
    }
    if lower
        .split(|c: char| !c.is_alphabetic())
        .any(|w| OPEN_WORDS.contains(&w))
    {
        return true;
    }
    let trimmed = lower.trim_end();
    (trimmed.ends_with("tól") || trimmed.ends_with("től")) && YEAR_RE.find_iter(&lower).count() == 1
}

/// Last four-digit year in a date string.
pub fn end_year(date: &str) -> Option<u32> {
    YEAR_RE.find_iter(date).last().and_then(|m| m.as_str().parse().ok())
}

// ── Tests ──
