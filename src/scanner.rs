//! Import scanning via per-language lexical patterns
//!
//! Extracts import/require statements from raw source text without parsing
//! the language. Each scan family carries an ordered table of regex rules, so
//! adding a language means adding table entries, not code branches. Malformed
//! or partial statements simply fail to match and are skipped; unsupported
//! languages yield an empty sequence, never an error.

use regex::{Captures, Regex};

use crate::language::{Language, ScanFamily};
use crate::types::RawImport;

/// How the captures of a matched rule become a [`RawImport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    /// `import <bindings> from '<path>'`
    EsImportFrom,
    /// `require('<path>')`, optionally with a `const X = ` binding prefix
    Require,
    /// `from <module> import <names>`
    PythonFromImport,
    /// `import <module>`
    PythonImport,
}

/// One lexical pattern plus its extraction behavior
struct ImportRule {
    pattern: Regex,
    kind: RuleKind,
}

/// Scans raw source text for import-like statements
pub struct ImportScanner {
    rules: Vec<(ScanFamily, Vec<ImportRule>)>,
}

impl ImportScanner {
    pub fn new() -> Self {
        let es_rules = vec![
            ImportRule {
                pattern: Regex::new(r#"import\s+([^;'"]+?)\s+from\s+['"]([^'"]+)['"]"#).unwrap(),
                kind: RuleKind::EsImportFrom,
            },
            ImportRule {
                pattern: Regex::new(
                    r#"(?:(?:const|let|var)\s+([^=\n]+?)\s*=\s*)?require\(\s*['"]([^'"]+)['"]\s*\)"#,
                )
                .unwrap(),
                kind: RuleKind::Require,
            },
        ];
        let python_rules = vec![
            ImportRule {
                pattern: Regex::new(r"(?m)^[ \t]*from[ \t]+([.\w]+)[ \t]+import[ \t]+([^\n]+)")
                    .unwrap(),
                kind: RuleKind::PythonFromImport,
            },
            ImportRule {
                pattern: Regex::new(r"(?m)^[ \t]*import[ \t]+([.\w]+)").unwrap(),
                kind: RuleKind::PythonImport,
            },
        ];
        Self {
            rules: vec![
                (ScanFamily::EsModule, es_rules),
                (ScanFamily::Python, python_rules),
            ],
        }
    }

    /// Extract all import statements from one file's text
    ///
    /// Records are ordered rule-major, matches within a rule in text order.
    pub fn scan(&self, content: &str, file_path: &str) -> Vec<RawImport> {
        let Some(family) = Language::from_path(file_path).and_then(|l| l.family()) else {
            return Vec::new();
        };
        let mut imports = Vec::new();
        for (rule_family, rules) in &self.rules {
            if *rule_family != family {
                continue;
            }
            for rule in rules {
                for caps in rule.pattern.captures_iter(content) {
                    if let Some(import) = extract(rule.kind, &caps, content) {
                        imports.push(import);
                    }
                }
            }
        }
        tracing::debug!(
            file = file_path,
            count = imports.len(),
            "extracted raw imports"
        );
        imports
    }
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a [`RawImport`] from one rule match, or reject it
fn extract(kind: RuleKind, caps: &Captures<'_>, content: &str) -> Option<RawImport> {
    let whole = caps.get(0)?;
    let line = line_of(content, whole.start());
    let statement = whole.as_str().trim().to_string();

    match kind {
        RuleKind::EsImportFrom => {
            let clause = caps.get(1)?.as_str();
            let target = caps.get(2)?.as_str();
            if is_scoped_package(target) || is_url(target) || !is_relative(target) {
                return None;
            }
            let names = split_bindings(clause);
            if names.is_empty() {
                return None;
            }
            Some(RawImport {
                statement,
                names,
                target: target.to_string(),
                line,
            })
        }
        RuleKind::Require => {
            let target = caps.get(2)?.as_str();
            if is_scoped_package(target) || is_url(target) {
                return None;
            }
            let names = match caps.get(1) {
                Some(binding) => split_bindings(binding.as_str()),
                None => vec![target.to_string()],
            };
            Some(RawImport {
                statement,
                names,
                target: target.to_string(),
                line,
            })
        }
        RuleKind::PythonFromImport => {
            let module = caps.get(1)?.as_str();
            if !module.starts_with('.') {
                return None;
            }
            let names = split_bindings(caps.get(2)?.as_str());
            if names.is_empty() {
                return None;
            }
            Some(RawImport {
                statement,
                names,
                target: module.to_string(),
                line,
            })
        }
        RuleKind::PythonImport => {
            let module = caps.get(1)?.as_str();
            if !module.starts_with('.') {
                return None;
            }
            Some(RawImport {
                statement,
                names: vec![module.to_string()],
                target: module.to_string(),
                line,
            })
        }
    }
}

/// 1-based source line of a byte offset
fn line_of(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Split a binding clause into locally-bound names
///
/// Strips destructuring braces, splits on comma, and keeps only the local
/// name of `X as Y` and `* as Y` forms.
fn split_bindings(clause: &str) -> Vec<String> {
    clause
        .replace(['{', '}'], " ")
        .split(',')
        .map(local_binding)
        .filter(|name| !name.is_empty())
        .collect()
}

/// `X as Y` and `* as Y` bind `Y`; anything else binds itself
fn local_binding(token: &str) -> String {
    let token = token.trim();
    match token.rsplit_once(" as ") {
        Some((_, local)) => local.trim().to_string(),
        None => token.to_string(),
    }
}

/// Organization-scoped package specifier, e.g. `@angular/core`
fn is_scoped_package(target: &str) -> bool {
    target.starts_with('@')
}

fn is_url(target: &str) -> bool {
    target.contains("://") || target.starts_with("http")
}

/// Relative-path marker required for the binding-extraction import form
fn is_relative(target: &str) -> bool {
    target.starts_with('.')
}
