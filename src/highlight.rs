//! Cross-reference highlighting over rendered source markup
//!
//! Merges usage occurrences into already-highlighted markup by operating on a
//! token stream of `{text, is_markup}` spans instead of splicing strings, so
//! existing tags are never corrupted and inserted markers are never re-tagged.
//! Color assignment is deterministic: dependencies claim palette colors in
//! detailed-list order, and a symbol name belongs to the first dependency
//! that imported it.

use regex::Regex;

use crate::types::ResolvedDependency;
use crate::usage::{canonical_name, is_import_line};

/// Fixed cycling palette for dependency colors
pub const PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6",
];

/// One span of rendered markup: either tag text or plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    pub text: String,
    pub is_markup: bool,
}

/// Split rendered markup into alternating text and tag spans
///
/// An unterminated tag at the end of input is kept as a markup span rather
/// than dropped.
pub fn tokenize_markup(markup: &str) -> Vec<MarkupSpan> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;

    for ch in markup.chars() {
        if !in_tag && ch == '<' {
            if !current.is_empty() {
                spans.push(MarkupSpan {
                    text: std::mem::take(&mut current),
                    is_markup: false,
                });
            }
            in_tag = true;
            current.push(ch);
        } else if in_tag && ch == '>' {
            current.push(ch);
            spans.push(MarkupSpan {
                text: std::mem::take(&mut current),
                is_markup: true,
            });
            in_tag = false;
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        spans.push(MarkupSpan {
            text: current,
            is_markup: in_tag,
        });
    }
    spans
}

/// A symbol claimed by one dependency, ready for matching
struct SymbolRule {
    symbol: String,
    pattern: Regex,
    color: String,
    /// Target file index of the owning dependency
    target: usize,
}

/// Annotates rendered markup with cross-reference markers
pub struct Highlighter;

impl Highlighter {
    pub fn new() -> Self {
        Self
    }

    /// Wrap every symbol usage in `markup` with an addressable marker
    ///
    /// Markers carry the owning dependency's target file index in `data-dep`
    /// and a palette color; text inside tags, inside already-inserted
    /// markers, and on import lines is left untouched. Pure with respect to
    /// the data model: identical input yields identical output.
    pub fn annotate(&self, markup: &str, dependencies: &[ResolvedDependency]) -> String {
        let rules = symbol_rules(dependencies);
        if rules.is_empty() {
            return markup.to_string();
        }

        let spans = tokenize_markup(markup);

        // Import lines are detected on the reconstructed plain text, not by
        // re-scanning the markup around each match.
        let plain: String = spans
            .iter()
            .filter(|s| !s.is_markup)
            .map(|s| s.text.as_str())
            .collect();
        let import_lines: Vec<bool> = plain.lines().map(is_import_line).collect();

        let mut output = String::with_capacity(markup.len());
        let mut line = 0usize; // 0-based index into import_lines
        for span in &spans {
            if span.is_markup {
                output.push_str(&span.text);
                continue;
            }
            for segment in span.text.split_inclusive('\n') {
                let is_import = import_lines.get(line).copied().unwrap_or(false);
                if is_import {
                    output.push_str(segment);
                } else {
                    output.push_str(&wrap_segment(segment, &rules));
                }
                if segment.ends_with('\n') {
                    line += 1;
                }
            }
        }
        output
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the deduplicated, length-ordered symbol rule list
///
/// Dependencies claim colors by cycling the palette in list order. A symbol
/// name is owned by the first dependency that imported it; later duplicates
/// are dropped before matching. Rules are sorted by descending name length
/// so longer identifiers match before shorter ones that might be substrings
/// of them.
fn symbol_rules(dependencies: &[ResolvedDependency]) -> Vec<SymbolRule> {
    let mut rules: Vec<SymbolRule> = Vec::new();
    for (order, dep) in dependencies.iter().enumerate() {
        let color = PALETTE[order % PALETTE.len()];
        for raw in &dep.names {
            let Some(symbol) = canonical_name(raw) else {
                continue;
            };
            if rules.iter().any(|r| r.symbol == symbol) {
                continue;
            }
            let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(&symbol))) else {
                continue;
            };
            rules.push(SymbolRule {
                symbol,
                pattern,
                color: color.to_string(),
                target: dep.target,
            });
        }
    }
    // Stable sort keeps first-seen order among equal lengths
    rules.sort_by(|a, b| b.symbol.len().cmp(&a.symbol.len()));
    rules
}

/// Wrap all non-overlapping symbol matches in one plain-text segment
fn wrap_segment(segment: &str, rules: &[SymbolRule]) -> String {
    // (start, end, rule index), longest symbols claim their ranges first
    let mut claimed: Vec<(usize, usize, usize)> = Vec::new();
    for (index, rule) in rules.iter().enumerate() {
        for found in rule.pattern.find_iter(segment) {
            let overlaps = claimed
                .iter()
                .any(|&(start, end, _)| found.start() < end && start < found.end());
            if !overlaps {
                claimed.push((found.start(), found.end(), index));
            }
        }
    }
    if claimed.is_empty() {
        return segment.to_string();
    }
    claimed.sort_by_key(|&(start, _, _)| start);

    let mut output = String::with_capacity(segment.len());
    let mut cursor = 0usize;
    for (start, end, index) in claimed {
        let rule = &rules[index];
        output.push_str(&segment[cursor..start]);
        output.push_str(&format!(
            "<span class=\"xref\" data-dep=\"{}\" style=\"color:{}\">{}</span>",
            rule.target,
            rule.color,
            &segment[start..end]
        ));
        cursor = end;
    }
    output.push_str(&segment[cursor..]);
    output
}
