use std::sync::LazyLock;

use regex::Regex;

use crate::config::SegmenterSettings;
use crate::language::Language;

static COLUMN_GAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {3,}|\t+").unwrap());

/// One paragraph (or, for oversized paragraphs, a line run) of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub index: usize,
    pub text: String,
    pub language: Language,
}

impl Block {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}

const BULLETS: &[char] = &['•', '-', '*', '●', '○', '▪', '◦', '→', '✓', '–', '·', '►'];

/// Split raw document text into ordered, non-empty blocks.
///
/// Paragraphs are separated by blank lines. A paragraph over the configured
/// size is cut at line breaks: at heading-like lines first, then every
/// `max_block_lines` lines.
pub fn segment(raw: &str, language: Language, settings: &SegmenterSettings) -> Vec<Block> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut blocks = Vec::new();

    for paragraph in paragraphs(&normalized, settings.split_columns) {
        if is_oversized(&paragraph, settings) {
            for piece in split_oversized(&paragraph, settings.max_block_lines) {
                push_block(&mut blocks, piece, language);
            }
        } else {
            push_block(&mut blocks, paragraph, language);
        }
    }

    blocks
}

fn push_block(blocks: &mut Vec<Block>, lines: Vec<String>, language: Language) {
    let text = lines.join("\n");
    if text.trim().is_empty() {
        return;
    }
    blocks.push(Block {
        index: blocks.len(),
        text,
        language,
    });
}

/// Trimmed, non-empty lines grouped by blank-line boundaries.
fn paragraphs(text: &str, split_columns: bool) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            continue;
        }
        if split_columns && COLUMN_GAP_RE.is_match(raw_line.trim()) {
            current.extend(
                COLUMN_GAP_RE
                    .split(raw_line.trim())
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
            );
        } else {
            current.push(raw_line.trim().to_string());
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out
}

fn is_oversized(lines: &[String], settings: &SegmenterSettings) -> bool {
    if lines.len() > settings.max_block_lines {
        return true;
    }
    let chars: usize = lines.iter().map(|l| l.chars().count() + 1).sum();
    chars.saturating_sub(1) > settings.max_block_chars
}

fn split_oversized(lines: &[String], max_lines: usize) -> Vec<Vec<String>> {
    let mut pieces: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if is_heading_like(line) && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(line.clone());
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
        .into_iter()
        .flat_map(|piece| {
            piece
                .chunks(max_lines)
                .map(|c| c.to_vec())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Short capitalized line without digits or terminal punctuation, e.g. "Work Experience".
pub fn is_heading_like(line: &str) -> bool {
    let line = line.trim();
    let body = line.strip_suffix(':').unwrap_or(line);
    let words = body.split_whitespace().count();
    if !(1..=4).contains(&words) {
        return false;
    }
    let Some(first) = body.chars().next() else {
        return false;
    };
    first.is_uppercase()
        && !starts_with_bullet(body)
        && !body.contains(" - ")
        && !body
            .chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '@' | ',' | '|' | ';' | ':' | '(' | ')' | '/'))
        && !body.ends_with('.')
}

pub fn starts_with_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLETS)
}

/// Drop a leading bullet glyph (and the whitespace after it).
pub fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    match trimmed.strip_prefix(BULLETS) {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}

// ── Tests ──
