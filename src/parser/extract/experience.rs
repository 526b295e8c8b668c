use super::dates::{find_date, header_date};
use super::{content_lines, description, fragments, has_company_suffix, has_job_indicator};
use crate::language::Language;
use crate::parser::blocks::starts_with_bullet;
use crate::record::ExperienceEntry;

const SEPARATORS: &[char] = &[' ', ',', '|', '-', '–', '—', '(', ')', ':', '/'];

/// Work history entries, one per dated header line.
///
/// Up to two header-like lines right above a date line (company, title)
/// belong to that entry; everything after it up to the next entry's header
/// is description.
pub fn extract(text: &str, language: Language) -> Vec<ExperienceEntry> {
    let lines = content_lines(text);
    if lines.is_empty() {
        return Vec::new();
    }

    let anchors: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| header_date(l, language).is_some())
        .map(|(i, _)| i)
        .collect();

    if anchors.is_empty() {
        return undated_entry(&lines, language).into_iter().collect();
    }

    // First header line of each entry.
    let starts: Vec<usize> = anchors
        .iter()
        .enumerate()
        .map(|(k, &anchor)| {
            let floor = if k == 0 { 0 } else { anchors[k - 1] + 1 };
            let mut start = anchor;
            while start > floor && anchor - start < 2 && is_header_line(lines[start - 1], language) {
                start -= 1;
            }
            start
        })
        .collect();

    let mut entries = Vec::with_capacity(anchors.len());
    for (k, &anchor) in anchors.iter().enumerate() {
        let end = starts.get(k + 1).copied().unwrap_or(lines.len());
        let mut entry = build_entry(&lines[starts[k]..anchor], lines[anchor], language);
        entry
            .descriptions
            .extend(lines[anchor + 1..end].iter().map(|l| description(l)).filter(|d| !d.is_empty()));
        entries.push(entry);
    }

    let mut preamble: Vec<String> = lines[..starts[0]].iter().map(|l| description(l)).collect();
    if !preamble.is_empty() {
        preamble.append(&mut entries[0].descriptions);
        entries[0].descriptions = preamble;
    }

    entries.retain(|e| !e.is_empty());
    entries
}

fn is_header_line(line: &str, language: Language) -> bool {
    !starts_with_bullet(line)
        && line.split_whitespace().count() <= 8
        && (!line.trim_end().ends_with('.') || has_company_suffix(line))
        && find_date(line, language).is_none()
}

fn build_entry(header: &[&str], date_line: &str, language: Language) -> ExperienceEntry {
    let mut parts: Vec<String> = header.iter().flat_map(|l| fragments(l)).collect();
    let mut date = String::new();
    if let Some(d) = find_date(date_line, language) {
        date = d.text.to_string();
        let (before, after) = d.surrounding(date_line);
        for side in [before, after] {
            let side = side.trim_matches(SEPARATORS);
            if !side.is_empty() {
                parts.extend(fragments(side));
            }
        }
    }

    let (job_title, company, rest) = split_header(parts, language);
    let mut entry = ExperienceEntry {
        company,
        job_title,
        date,
        descriptions: Vec::new(),
    };
    if !rest.is_empty() {
        entry.descriptions.push(rest.join(", "));
    }
    entry
}

/// Title = first fragment naming a role; company = first remaining fragment
/// with a legal suffix, else the first remaining fragment.
fn split_header(mut parts: Vec<String>, language: Language) -> (String, String, Vec<String>) {
    let job_title = parts
        .iter()
        .position(|p| has_job_indicator(p, language))
        .map(|i| parts.remove(i))
        .unwrap_or_default();
    let company_at = parts
        .iter()
        .position(|p| has_company_suffix(p))
        .or(if parts.is_empty() { None } else { Some(0) });
    let company = company_at.map(|i| parts.remove(i)).unwrap_or_default();
    (job_title, company, parts)
}

fn undated_entry(lines: &[&str], language: Language) -> Option<ExperienceEntry> {
    let (first, rest) = lines.split_first()?;
    let mut entry = if is_header_line(first, language) {
        let (job_title, company, leftover) = split_header(fragments(first), language);
        let mut e = ExperienceEntry {
            company,
            job_title,
            ..Default::default()
        };
        if !leftover.is_empty() {
            e.descriptions.push(leftover.join(", "));
        }
        e
    } else {
        ExperienceEntry {
            descriptions: vec![description(first)],
            ..Default::default()
        }
    };
    entry.descriptions.extend(rest.iter().map(|l| description(l)));
    Some(entry)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_with_bullets() {
        let text = "Software Engineer at ACME Corp\nJan 2019 - Present\n• Built the billing service\n• Led a team of 4";
        let entries = extract(text, Language::English);
        assert_eq!(
            entries,
            vec![ExperienceEntry {
                company: "ACME Corp".into(),
                job_title: "Software Engineer".into(),
                date: "Jan 2019 - Present".into(),
                descriptions: vec!["Built the billing service".into(), "Led a team of 4".into()],
            }]
        );
    }

    #[test]
    fn entries_split_on_dates() {
        let text = "Work Experience\n\
                    ACME Inc.\nSenior Developer\n2019 - 2023\n- Designed the payments API\n\n\
                    Junior Developer | Foo Ltd.\n2016 - 2019\n- Maintained internal tools";
        let entries = extract(text, Language::English);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "ACME Inc.");
        assert_eq!(entries[0].job_title, "Senior Developer");
        assert_eq!(entries[0].date, "2019 - 2023");
        assert_eq!(entries[0].descriptions, vec!["Designed the payments API"]);
        assert_eq!(entries[1].company, "Foo Ltd.");
        assert_eq!(entries[1].job_title, "Junior Developer");
        assert_eq!(entries[1].descriptions, vec!["Maintained internal tools"]);
    }

    #[test]
    fn date_on_header_line() {
        let entries = extract("Data Analyst, Globex Corp., 2015 - 2017", Language::English);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].job_title, "Data Analyst");
        assert_eq!(entries[0].company, "Globex Corp.");
        assert_eq!(entries[0].date, "2015 - 2017");
    }

    #[test]
    fn dates_in_bullets_do_not_split() {
        let text = "Engineer at ACME\n2018 - 2022\n• Migrated the 2019 billing stack\n• Shipped v2 in 2020";
        let entries = extract(text, Language::English);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].descriptions.len(), 2);
    }

    #[test]
    fn leftover_fragments_become_first_description() {
        let entries = extract("Backend Developer | ACME Inc. | Remote\n2020 - 2021", Language::English);
        assert_eq!(entries[0].descriptions, vec!["Remote"]);
    }

    #[test]
    fn hungarian_entry() {
        let text = "Szoftverfejlesztő - Példa Kft.\n2019 - jelenleg\n• Számlázó rendszer fejlesztése";
        let entries = extract(text, Language::Hungarian);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].job_title, "Szoftverfejlesztő");
        assert_eq!(entries[0].company, "Példa Kft.");
        assert_eq!(entries[0].date, "2019 - jelenleg");
        assert_eq!(entries[0].descriptions, vec!["Számlázó rendszer fejlesztése"]);
    }

    #[test]
    fn undated_section_is_one_entry() {
        let entries = extract("Freelance Consultant\nHelped clients ship products.", Language::English);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].job_title, "Freelance Consultant");
        assert_eq!(entries[0].descriptions, vec!["Helped clients ship products."]);
    }

    #[test]
    fn empty_and_heading_only() {
        assert!(extract("", Language::English).is_empty());
        assert!(extract("Experience", Language::English).is_empty());
    }
}
