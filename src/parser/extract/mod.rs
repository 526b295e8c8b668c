pub mod dates;
pub mod education;
pub mod experience;
pub mod languages;
pub mod ner;
pub mod position;
pub mod profile;
pub mod skills;

use std::sync::LazyLock;

use regex::Regex;

use super::blocks::strip_bullet;
use super::classify::SectionLabel;
use super::sections::SectionSpan;
use crate::language::Language;
use crate::record::{EducationEntry, ExperienceEntry, LanguageEntry, Profile};

/// What one extractor produced for one span.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutput {
    Profile(Profile),
    Education(Vec<EducationEntry>),
    Experience(Vec<ExperienceEntry>),
    Skills(Vec<String>),
    Languages(Vec<LanguageEntry>),
    Other,
}

/// Run the extractor registered for `label` over a section's text. Never fails.
pub fn extract(label: SectionLabel, text: &str, language: Language) -> SectionOutput {
    match label {
        SectionLabel::Profile => SectionOutput::Profile(profile::extract(text, language)),
        SectionLabel::Education => SectionOutput::Education(education::extract(text, language)),
        SectionLabel::Experience => SectionOutput::Experience(experience::extract(text, language)),
        SectionLabel::Skills => SectionOutput::Skills(skills::extract(text, language)),
        SectionLabel::Languages => SectionOutput::Languages(languages::extract(text, language)),
        SectionLabel::Other => SectionOutput::Other,
    }
}

/// Extract every span in document order. PROFILE spans are concatenated and
/// extracted once, at the position of the first one.
pub fn extract_all(spans: &[SectionSpan], language: Language) -> Vec<SectionOutput> {
    let profile_text = spans
        .iter()
        .filter(|s| s.label == SectionLabel::Profile)
        .map(SectionSpan::text)
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut outputs = Vec::with_capacity(spans.len());
    let mut profile_done = false;
    for span in spans {
        if span.label == SectionLabel::Profile {
            if !profile_done {
                outputs.push(extract(SectionLabel::Profile, &profile_text, language));
                profile_done = true;
            }
            continue;
        }
        outputs.push(extract(span.label, &span.text(), language));
    }
    outputs
}

// ── Section headings ──

const HEADINGS: &[&str] = &[
    // en
    "profile", "summary", "professional summary", "personal summary", "about", "about me",
    "contact", "contacts", "contact information", "contact details", "personal information",
    "personal details", "personal data", "objective", "career objective", "curriculum vitae",
    "resume", "résumé", "education", "educational background", "academic background",
    "education and training", "qualifications", "academic qualifications", "experience",
    "work experience", "professional experience", "employment", "employment history",
    "work history", "career history", "relevant experience", "skills", "technical skills",
    "key skills", "core skills", "it skills", "core competencies", "competencies",
    "skills and competencies", "technologies", "languages", "language", "language skills",
    "other", "interests", "hobbies", "hobbies and interests", "references", "certifications",
    // hu
    "profil", "bemutatkozás", "magamról", "összefoglaló", "szakmai összefoglaló", "elérhetőség",
    "elérhetőségek", "személyes adatok", "önéletrajz", "szakmai önéletrajz", "tanulmányok",
    "tanulmányaim", "iskolai végzettség", "iskolai végzettségek", "végzettség", "oktatás",
    "képzettség", "képzések", "szakmai tapasztalat", "szakmai tapasztalatok", "munkatapasztalat",
    "munkatapasztalatok", "munkahelyek", "tapasztalat", "korábbi munkahelyek", "készségek",
    "kompetenciák", "ismeretek", "képességek", "informatikai ismeretek", "számítógépes ismeretek",
    "egyéb készségek", "nyelvtudás", "nyelvismeret", "nyelvek", "idegen nyelvek", "egyéb",
    "hobbi", "érdeklődési kör", "referenciák",
];

fn is_heading_text(s: &str) -> bool {
    let key = s.trim().trim_end_matches(':').trim().to_lowercase();
    HEADINGS.contains(&key.as_str())
}

/// `Some("")` for a bare heading line, `Some(rest)` for `Heading: rest`.
pub fn heading_rest(line: &str) -> Option<&str> {
    if let Some((head, rest)) = line.split_once(':') {
        if is_heading_text(head) {
            return Some(rest.trim());
        }
    }
    is_heading_text(line).then_some("")
}

/// Trimmed non-empty lines with section headings removed; inline content
/// after a `Heading:` prefix is kept.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            heading_rest(line).unwrap_or(line)
        })
        .filter(|l| !l.is_empty())
        .collect()
}

// ── Fragments ──

static FRAGMENT_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*|\s+at\s+|\s+@\s+|\s+[-–—]\s+|\s*,\s*").unwrap());

const COMPANY_SUFFIXES: &[&str] = &[
    "inc", "ltd", "llc", "corp", "co", "gmbh", "plc", "ag", "sa", "kft", "zrt", "bt", "nyrt", "kkt",
];

/// True when the last word is a legal-form suffix such as `Inc.` or `Kft.`.
pub fn has_company_suffix(fragment: &str) -> bool {
    fragment
        .split_whitespace()
        .last()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .is_some_and(|w| COMPANY_SUFFIXES.contains(&w.as_str()))
}

/// Split a header line into its parts, re-attaching detached suffixes
/// (`ACME, Inc.` stays one fragment).
pub fn fragments(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in FRAGMENT_SPLIT_RE.split(strip_bullet(line)) {
        let part = part.trim().trim_matches(|c: char| matches!(c, '(' | ')' | '|'));
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let bare_suffix = part.split_whitespace().count() == 1 && has_company_suffix(part);
        match out.last_mut() {
            Some(prev) if bare_suffix => {
                prev.push_str(", ");
                prev.push_str(part);
            }
            _ => out.push(part.to_string()),
        }
    }
    out
}

// ── Job titles ──

const JOB_WORDS_EN: &[&str] = &[
    "engineer", "developer", "manager", "intern", "analyst", "consultant", "designer",
    "architect", "lead", "director", "specialist", "administrator", "assistant", "officer",
    "coordinator", "scientist", "programmer", "technician", "head", "executive", "teacher",
    "accountant", "associate", "founder", "co-founder", "ceo", "cto", "cfo", "coo", "researcher",
    "tester", "owner", "supervisor", "representative", "trainee", "president", "editor", "writer",
    "nurse", "advisor", "agent", "clerk", "operator", "instructor", "lecturer", "devops", "sre",
];

const JOB_WORDS_HU: &[&str] = &[
    "fejlesztő", "mérnök", "vezető", "munkatárs", "gyakornok", "elemző", "tanácsadó",
    "asszisztens", "igazgató", "ügyintéző", "programozó", "tervező", "specialista", "menedzser",
    "referens", "előadó", "tesztelő", "rendszergazda", "tanár", "könyvelő", "szakértő",
    "operátor", "koordinátor", "értékesítő", "ügyvezető", "titkár", "oktató", "kutató",
];

/// Whether a fragment names a job role. Hungarian roles match inside
/// compounds (`szoftverfejlesztő`).
pub fn has_job_indicator(fragment: &str, language: Language) -> bool {
    let lower = fragment.to_lowercase();
    let english = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .any(|w| JOB_WORDS_EN.contains(&w));
    match language {
        Language::English => english,
        Language::Hungarian => english || JOB_WORDS_HU.iter().any(|w| lower.contains(w)),
    }
}

/// Description line with its bullet glyph removed.
pub fn description(line: &str) -> String {
    strip_bullet(line).to_string()
}

/// Split on list delimiters (`,` `;` `|` `•` `·`), never inside parentheses.
pub fn split_list_items(line: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' | ';' | '|' | '•' | '·' if depth == 0 => {
                items.push(&line[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    items.push(&line[start..]);
    items
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// ── Tests ──
