use std::sync::LazyLock;

use regex::Regex;

use super::dates::header_date;
use super::{content_lines, description, fragments};
use crate::language::Language;
use crate::parser::blocks::starts_with_bullet;
use crate::record::EducationEntry;

static EN_GPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:c?gpa|grade point average)\s*[:=]?\s*(\d+(?:\.\d+)?)(?:\s*/\s*\d+(?:\.\d+)?)?")
        .unwrap()
});
static HU_GPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:tanulmányi\s+átlag|átlag|gpa|jegy|minősítés|eredmény)\s*[:=]?\s*(\d+(?:[.,]\d+)?|kitűnő|jeles|jó|közepes|elégséges)",
    )
    .unwrap()
});

static EN_DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:b\.?\s?sc|m\.?\s?sc|b\.?\s?a|m\.?\s?a|b\.?\s?eng|m\.?\s?eng|b\.?s|m\.?s|ph\.?\s?d|mba|bachelor|master|doctor(?:ate)?|associate|diploma|degree|certificate|high school diploma)\b",
    )
    .unwrap()
});
static HU_DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\bb\.?\s?sc\b|\bm\.?\s?sc\b|\bph\.?\s?d\b|\bmba\b|alapképzés|mesterképzés|diploma|oklevél|okleveles|érettségi|\bszak\b|szakirány|mérnök|közgazdász|bachelor|master)",
    )
    .unwrap()
});

/// Words that make a degree-mentioning line a description instead.
const NOT_A_DEGREE: &[&str] = &[
    "thesis", "dissertation", "project", "coursework", "courses", "award", "scholarship",
    "szakdolgozat", "diplomamunka", "projekt", "tantárgy", "ösztöndíj",
];

const SCHOOL_CUES_EN: &[&str] = &[
    "university", "college", "school", "academy", "institute", "polytechnic", "conservatory",
];
const SCHOOL_CUES_HU: &[&str] = &[
    "egyetem", "főiskola", "gimnázium", "iskola", "akadémia", "intézet", "technikum", "szakképző",
];

/// Education entries. A line naming an institution, a dated header line or a
/// degree line opens a new entry only when the current one already holds
/// that field (a degree also needs a date first).
pub fn extract(text: &str, language: Language) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut cur = EducationEntry::default();

    for line in content_lines(text) {
        if starts_with_bullet(line) {
            cur.descriptions.push(description(line));
            continue;
        }

        let mut rest = line.to_string();
        if let Some((gpa, span)) = find_gpa(&rest, language) {
            if cur.gpa.is_empty() {
                cur.gpa = gpa;
                rest.replace_range(span, " ");
            }
        }

        if let Some(d) = header_date(&rest, language) {
            if !cur.date.is_empty() {
                flush(&mut entries, &mut cur);
            }
            cur.date = d.text.to_string();
            let range = d.start..d.end;
            rest.replace_range(range, " ");
        }

        let mut leftovers = Vec::new();
        for frag in fragments(&rest) {
            if is_school(&frag, language) {
                if !cur.school.is_empty() {
                    flush(&mut entries, &mut cur);
                }
                cur.school = frag;
            } else if let Some(degree) = degree_text(&frag, language) {
                if !cur.degree.is_empty() && !cur.date.is_empty() {
                    flush(&mut entries, &mut cur);
                }
                if cur.degree.is_empty() {
                    cur.degree = degree.to_string();
                } else {
                    leftovers.push(frag);
                }
            } else {
                leftovers.push(frag);
            }
        }
        if !leftovers.is_empty() {
            cur.descriptions.push(leftovers.join(", "));
        }
    }
    flush(&mut entries, &mut cur);

    entries
}

fn flush(entries: &mut Vec<EducationEntry>, cur: &mut EducationEntry) {
    let done = std::mem::take(cur);
    if done.has_anchor() {
        entries.push(done);
    }
}

fn is_school(fragment: &str, language: Language) -> bool {
    let lower = fragment.to_lowercase();
    let cues = match language {
        Language::English => SCHOOL_CUES_EN,
        Language::Hungarian => SCHOOL_CUES_HU,
    };
    cues.iter().any(|c| lower.contains(c))
}

/// The degree named by a fragment. A `Label: value` fragment is judged by
/// its value, so `Degree: BSc` yields `BSc` and `Bachelor thesis: ...` nothing.
fn degree_text(fragment: &str, language: Language) -> Option<&str> {
    let lower = fragment.to_lowercase();
    if NOT_A_DEGREE.iter().any(|w| lower.contains(w)) {
        return None;
    }
    let value = fragment.split_once(':').map_or(fragment, |(_, rest)| rest).trim();
    let re = match language {
        Language::English => &*EN_DEGREE_RE,
        Language::Hungarian => &*HU_DEGREE_RE,
    };
    re.is_match(value).then_some(value)
}

/// Normalized GPA and the byte range it occupied, when within the dialect's scale.
pub fn find_gpa(line: &str, language: Language) -> Option<(String, std::ops::Range<usize>)> {
    let (re, max) = match language {
        Language::English => (&*EN_GPA_RE, 4.0),
        Language::Hungarian => (&*HU_GPA_RE, 5.0),
    };
    let caps = re.captures(line)?;
    let whole = caps.get(0)?;
    let raw = caps.get(1)?.as_str();

    let value = match raw.to_lowercase().as_str() {
        "kitűnő" | "jeles" => "5.0".to_string(),
        "jó" => "4.0".to_string(),
        "közepes" => "3.0".to_string(),
        "elégséges" => "2.0".to_string(),
        _ => {
            let normalized = raw.replace(',', ".");
            let number: f32 = normalized.parse().ok()?;
            if !(0.0..=max).contains(&number) {
                return None;
            }
            normalized
        }
    };
    Some((value, whole.range()))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_all_fields() {
        let entries = extract(
            "ACME University\nB.Sc. Computer Science\nGPA: 3.8\n2016-2020",
            Language::English,
        );
        assert_eq!(
            entries,
            vec![EducationEntry {
                school: "ACME University".into(),
                degree: "B.Sc. Computer Science".into(),
                gpa: "3.8".into(),
                date: "2016-2020".into(),
                descriptions: vec![],
            }]
        );
    }

    #[test]
    fn two_schools_two_entries() {
        let text = "Education\n\
                    ACME University\nM.Sc. Data Science\n2020 - 2022\n\
                    Globex College\nB.A. Economics\n2016 - 2020\n• Dean's list";
        let entries = extract(text, Language::English);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].school, "ACME University");
        assert_eq!(entries[0].degree, "M.Sc. Data Science");
        assert_eq!(entries[1].school, "Globex College");
        assert_eq!(entries[1].date, "2016 - 2020");
        assert_eq!(entries[1].descriptions, vec!["Dean's list"]);
    }

    #[test]
    fn one_line_entries() {
        let text = "M.Sc. Physics, ACME University, 2018 - 2020\nB.Sc. Physics, ACME University, 2015 - 2018";
        let entries = extract(text, Language::English);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].degree, "B.Sc. Physics");
        assert_eq!(entries[1].date, "2015 - 2018");
    }

    #[test]
    fn gpa_scales() {
        assert_eq!(find_gpa("GPA: 3.8/4.0", Language::English).map(|g| g.0), Some("3.8".into()));
        assert_eq!(find_gpa("GPA 9.1", Language::English), None);
        assert_eq!(find_gpa("Átlag: 4,5", Language::Hungarian).map(|g| g.0), Some("4.5".into()));
        assert_eq!(find_gpa("Minősítés: jeles", Language::Hungarian).map(|g| g.0), Some("5.0".into()));
        assert_eq!(find_gpa("Tanulmányi átlag: 6", Language::Hungarian), None);
    }

    #[test]
    fn out_of_range_gpa_stays_in_descriptions() {
        let entries = extract("ACME University\nGPA 9.1", Language::English);
        assert_eq!(entries[0].gpa, "");
        assert_eq!(entries[0].descriptions, vec!["GPA 9.1"]);
    }

    #[test]
    fn thesis_line_is_a_description() {
        let entries = extract(
            "ACME University\nB.Sc. Computer Science\n2016-2020\nBachelor thesis: Distributed consensus",
            Language::English,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "B.Sc. Computer Science");
        assert_eq!(entries[0].descriptions, vec!["Bachelor thesis: Distributed consensus"]);

        let entries = extract(
            "Budapesti Műszaki Egyetem\nMérnökinformatikus BSc\n2014 - 2018\nSzakdolgozat: mérnöki szimuláció",
            Language::Hungarian,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].descriptions, vec!["Szakdolgozat: mérnöki szimuláció"]);
    }

    #[test]
    fn labelled_degree_still_counts() {
        let entries = extract("ACME University\nDegree: BSc Physics\n2015 - 2018", Language::English);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "BSc Physics");
    }

    #[test]
    fn hungarian_entry() {
        let text = "Budapesti Műszaki Egyetem\nMérnökinformatikus BSc\n2014 - 2018\nÁtlag: 4,2";
        let entries = extract(text, Language::Hungarian);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school, "Budapesti Műszaki Egyetem");
        assert_eq!(entries[0].degree, "Mérnökinformatikus BSc");
        assert_eq!(entries[0].date, "2014 - 2018");
        assert_eq!(entries[0].gpa, "4.2");
    }

    #[test]
    fn entries_without_anchor_are_omitted() {
        assert!(extract("Some free text without structure", Language::English).is_empty());
        assert!(extract("", Language::Hungarian).is_empty());
    }
}
