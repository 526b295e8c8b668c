use super::dates::{end_year, is_open_ended};
use crate::record::ExperienceEntry;

/// Job title of the first open-ended entry, else of the entry that ended
/// latest. Entries without a title never qualify.
pub fn current_position(experience: &[ExperienceEntry]) -> String {
    let titled = || experience.iter().filter(|e| !e.job_title.is_empty());

    if let Some(open) = titled().find(|e| is_open_ended(&e.date)) {
        return open.job_title.clone();
    }

    let mut best: Option<(u32, &ExperienceEntry)> = None;
    for entry in titled() {
        let Some(year) = end_year(&entry.date) else {
            continue;
        };
        if best.map_or(true, |(y, _)| year > y) {
            best = Some((year, entry));
        }
    }
    best.map(|(_, e)| e.job_title.clone()).unwrap_or_default()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, date: &str) -> ExperienceEntry {
        ExperienceEntry {
            job_title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn open_ended_wins() {
        let exp = [job("Intern", "2015 - 2016"), job("Lead Engineer", "Jan 2021 - Present"), job("CTO", "2022 - now")];
        assert_eq!(current_position(&exp), "Lead Engineer");
    }

    #[test]
    fn latest_end_year_otherwise() {
        let exp = [job("Developer", "2014 - 2017"), job("Architect", "2017 - 2020"), job("Analyst", "2018 - 2020")];
        assert_eq!(current_position(&exp), "Architect");
    }

    #[test]
    fn hungarian_open_end() {
        let exp = [job("Gyakornok", "2017 - 2018"), job("Szoftverfejlesztő", "2019-től")];
        assert_eq!(current_position(&exp), "Szoftverfejlesztő");
    }

    #[test]
    fn untitled_entries_skipped() {
        assert_eq!(current_position(&[job("", "2020 - present")]), "");
        assert_eq!(current_position(&[job("", "2020 - present"), job("QA", "2010 - 2012")]), "QA");
        assert_eq!(current_position(&[]), "");
    }
}
