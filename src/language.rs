//! Language classification from file extensions
//!
//! Maps a filename to a language tag, a fixed display color for graph nodes,
//! and the lexical scan family used by the import scanner. The extension set
//! is closed: anything else is ignored during scanning and never becomes a
//! graph node.

use serde::{Deserialize, Serialize};

/// Language tag for a scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Python,
    Html,
    Css,
    Scss,
    Markdown,
    Json,
    Yaml,
    Toml,
    Xml,
}

/// Lexical pattern family applied by the import scanner
///
/// Display-only languages (markup, data formats) have no family and always
/// yield an empty import sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanFamily {
    /// `import ... from '...'` and `require('...')` forms
    EsModule,
    /// `from .mod import names` and `import .mod` forms
    Python,
}

impl Language {
    /// Classify a file by the extension of its path
    pub fn from_path(path: &str) -> Option<Language> {
        let extension = path.rsplit('.').next()?;
        if extension == path {
            // No dot at all
            return None;
        }
        let lang = match extension.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "ts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "py" => Language::Python,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "scss" | "sass" => Language::Scss,
            "md" | "markdown" => Language::Markdown,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "toml" => Language::Toml,
            "xml" => Language::Xml,
            _ => return None,
        };
        Some(lang)
    }

    /// Human-readable tag for display and logging
    pub fn tag(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Jsx => "JavaScript (JSX)",
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TypeScript (TSX)",
            Language::Python => "Python",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Scss => "SCSS",
            Language::Markdown => "Markdown",
            Language::Json => "JSON",
            Language::Yaml => "YAML",
            Language::Toml => "TOML",
            Language::Xml => "XML",
        }
    }

    /// Fixed display color for graph nodes of this language
    pub fn color(&self) -> &'static str {
        match self {
            Language::JavaScript => "#f1e05a",
            Language::Jsx => "#f1e05a",
            Language::TypeScript => "#3178c6",
            Language::Tsx => "#3178c6",
            Language::Python => "#3572a5",
            Language::Html => "#e34c26",
            Language::Css => "#563d7c",
            Language::Scss => "#c6538c",
            Language::Markdown => "#083fa1",
            Language::Json => "#8bc34a",
            Language::Yaml => "#cb171e",
            Language::Toml => "#9c4221",
            Language::Xml => "#0060ac",
        }
    }

    /// Scan family, if this language participates in import extraction
    pub fn family(&self) -> Option<ScanFamily> {
        match self {
            Language::JavaScript | Language::Jsx | Language::TypeScript | Language::Tsx => {
                Some(ScanFamily::EsModule)
            }
            Language::Python => Some(ScanFamily::Python),
            _ => None,
        }
    }
}
