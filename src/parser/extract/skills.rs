use std::collections::HashSet;

use super::{content_lines, split_list_items};
use crate::language::Language;
use crate::parser::blocks::strip_bullet;

const MAX_SKILL_WORDS: usize = 6;

/// Skill items in first-seen order, de-duplicated case-insensitively.
pub fn extract(text: &str, _language: Language) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();

    for line in content_lines(text) {
        let line = drop_category(strip_bullet(line));
        for item in split_list_items(line) {
            let item = item.trim_end_matches('.').trim();
            if item.is_empty() || item.split_whitespace().count() > MAX_SKILL_WORDS {
                continue;
            }
            push_unique(&mut skills, &mut seen, item);
        }
    }

    skills
}

/// Append unless an item with the same case-folded text is already present.
pub fn push_unique(skills: &mut Vec<String>, seen: &mut HashSet<String>, item: &str) {
    if seen.insert(item.to_lowercase()) {
        skills.push(item.to_string());
    }
}

/// `Programming: Rust, Go` → `Rust, Go`. Only short prefixes outside
/// parentheses count as categories.
fn drop_category(line: &str) -> &str {
    match line.split_once(':') {
        Some((head, rest))
            if head.split_whitespace().count() <= 3 && !head.contains('(') && !rest.trim().is_empty() =>
        {
            rest.trim()
        }
        _ => line,
    }
}

// ── Tests ──
