//! Symbol usage location inside an importing file
//!
//! Given the raw imported name tokens of one dependency, finds every later
//! whole-word occurrence of each symbol's canonical name in the file text,
//! skipping the declaring import line and any other import/require line so
//! the declaration itself is never flagged as a usage.

use regex::Regex;

use crate::types::UsageOccurrence;

/// Canonicalize one raw imported name token to its locally-bound identifier
///
/// Strips destructuring braces, resolves `X as Y` and `* as Y` to `Y`, keeps
/// only the first comma-separated token, and discards empty results and bare
/// wildcards.
pub fn canonical_name(raw: &str) -> Option<String> {
    let stripped = raw.replace(['{', '}'], " ");
    let first = stripped.split(',').next()?.trim();
    let name = match first.rsplit_once(" as ") {
        Some((_, local)) => local.trim(),
        None => first,
    };
    if name.is_empty() || name == "*" {
        return None;
    }
    Some(name.to_string())
}

/// Locates usage occurrences of imported symbols
pub struct UsageLocator;

impl UsageLocator {
    pub fn new() -> Self {
        Self
    }

    /// Find every usage of `names` in `content`, excluding import lines
    ///
    /// `import_line` is the 1-based line of the import statement the names
    /// came from; occurrences on that line are never reported.
    pub fn locate(
        &self,
        content: &str,
        names: &[String],
        import_line: usize,
    ) -> Vec<UsageOccurrence> {
        let mut occurrences = Vec::new();
        for raw in names {
            let Some(symbol) = canonical_name(raw) else {
                continue;
            };
            let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(&symbol))) else {
                continue;
            };
            for (line_index, line_text) in content.lines().enumerate() {
                let line = line_index + 1;
                if line == import_line || is_import_line(line_text) {
                    continue;
                }
                for found in pattern.find_iter(line_text) {
                    occurrences.push(UsageOccurrence {
                        line,
                        column: found.start(),
                        symbol: symbol.clone(),
                        line_text: line_text.trim().to_string(),
                    });
                }
            }
        }
        occurrences
    }
}

impl Default for UsageLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines that declare imports rather than use them
pub fn is_import_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("import ")
        || trimmed.starts_with("from ")
        || (trimmed.contains("require(") && trimmed.contains('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(content: &str, names: &[&str], import_line: usize) -> Vec<UsageOccurrence> {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        UsageLocator::new().locate(content, &names, import_line)
    }

    #[test]
    fn test_canonical_name_plain() {
        assert_eq!(canonical_name("Button"), Some("Button".to_string()));
        assert_eq!(canonical_name("  Button  "), Some("Button".to_string()));
    }

    #[test]
    fn test_canonical_name_braces() {
        assert_eq!(canonical_name("{ Button }"), Some("Button".to_string()));
    }

    #[test]
    fn test_canonical_name_alias() {
        assert_eq!(canonical_name("format as fmt"), Some("fmt".to_string()));
        assert_eq!(canonical_name("* as utils"), Some("utils".to_string()));
    }

    #[test]
    fn test_canonical_name_first_comma_token() {
        assert_eq!(canonical_name("A, B"), Some("A".to_string()));
    }

    #[test]
    fn test_canonical_name_discards_empty_and_wildcard() {
        assert_eq!(canonical_name(""), None);
        assert_eq!(canonical_name("   "), None);
        assert_eq!(canonical_name("*"), None);
        assert_eq!(canonical_name("{ }"), None);
    }

    #[test]
    fn test_finds_usage_after_import() {
        let content = "import { Button } from './Button';\n\
                       const b = <Button />;\n";
        let found = locate(content, &["Button"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].symbol, "Button");
        assert_eq!(found[0].line_text, "const b = <Button />;");
    }

    #[test]
    fn test_never_reports_the_import_line() {
        let content = "import { Button } from './Button';\n";
        assert!(locate(content, &["Button"], 1).is_empty());
    }

    #[test]
    fn test_skips_other_import_lines() {
        let content = "import { Button } from './Button';\n\
                       import { Button as B } from './other';\n\
                       Button();\n";
        let found = locate(content, &["Button"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn test_skips_require_assignment_lines() {
        let content = "const Button = require('./Button');\n\
                       Button.render();\n";
        let found = locate(content, &["Button"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn test_whole_word_matching() {
        let content = "import { Foo } from './foo';\n\
                       const a = FooBar;\n\
                       const b = MyFoo;\n\
                       const c = Foo;\n";
        let found = locate(content, &["Foo"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 4);
    }

    #[test]
    fn test_multiple_occurrences_on_one_line() {
        let content = "import { add } from './math';\n\
                       const sum = add(add(1, 2), 3);\n";
        let found = locate(content, &["add"], 1);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert!(found[0].column < found[1].column);
    }

    #[test]
    fn test_column_is_match_start() {
        let content = "import { x } from './x';\nlet y = x;\n";
        let found = locate(content, &["x"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].column, 8);
    }

    #[test]
    fn test_python_from_line_skipped() {
        let content = "from .utils import helper\n\
                       value = helper()\n";
        let found = locate(content, &["helper"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn test_alias_matches_local_name_only() {
        let content = "import { format as fmt } from './dates';\n\
                       fmt(now);\n\
                       format(now);\n";
        let found = locate(content, &["format as fmt"], 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].symbol, "fmt");
        assert_eq!(found[0].line, 2);
    }
}
