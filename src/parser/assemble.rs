use std::collections::HashSet;

use super::extract::position::current_position;
use super::extract::skills::push_unique;
use super::extract::SectionOutput;
use crate::language::Language;
use crate::record::{CvRecord, Profile};

/// Fold extractor outputs (document order) into the canonical record.
///
/// Missing sections keep their empty defaults. Entries accumulate across
/// spans; skills are de-duplicated across spans as well.
pub fn assemble(extracted: Vec<SectionOutput>, detected_language: Language) -> CvRecord {
    let mut record = CvRecord {
        detected_language,
        ..Default::default()
    };
    let mut seen_skills = HashSet::new();

    for output in extracted {
        match output {
            SectionOutput::Profile(p) => merge_profile(&mut record.profile, p),
            SectionOutput::Education(entries) => record.education.extend(entries),
            SectionOutput::Experience(entries) => record.experience.extend(entries),
            SectionOutput::Skills(skills) => {
                for skill in &skills {
                    push_unique(&mut record.skills, &mut seen_skills, skill);
                }
            }
            SectionOutput::Languages(entries) => record.languages.extend(entries),
            SectionOutput::Other => {}
        }
    }

    record.current_position = current_position(&record.experience);
    record
}

/// Fill empty fields only, so the first profile seen wins.
fn merge_profile(into: &mut Profile, from: Profile) {
    let fill = |dst: &mut String, src: String| {
        if dst.is_empty() {
            *dst = src;
        }
    };
    fill(&mut into.name, from.name);
    fill(&mut into.email, from.email);
    fill(&mut into.phone, from.phone);
    fill(&mut into.location, from.location);
    fill(&mut into.url, from.url);
    fill(&mut into.summary, from.summary);
}

// ── Tests ──
