//! Heuristic resolution of raw imports to scanned files
//!
//! Deliberately permissive: the import path is matched against the file set
//! by substring and suffix rules rather than filesystem-accurate module
//! resolution, which tolerates varied relative-path depths at the cost of
//! possible false positives on repeated basenames. The first match in scan
//! order wins; this tie-break is part of the contract and must stay stable.

use crate::types::{FileRecord, RawImport};

/// Resolve a raw import to an index into `files`, or `None` if nothing matches
///
/// A file matches when its path contains the normalized import string, or its
/// bare name equals the raw import string, or its path ends with the
/// normalized string plus that file's own extension.
pub fn resolve(import: &RawImport, files: &[FileRecord]) -> Option<usize> {
    let normalized = normalize_target(&import.target);
    files.iter().position(|file| {
        file.path.contains(normalized)
            || file.name == import.target
            || ends_with_own_extension(&file.path, normalized)
    })
}

/// Strip one leading relative marker: `./`, `../`, or a bare `.`
///
/// The bare-dot form is the intra-package marker of Python-style modules.
fn normalize_target(target: &str) -> &str {
    if let Some(rest) = target.strip_prefix("./") {
        rest
    } else if let Some(rest) = target.strip_prefix("../") {
        rest
    } else if let Some(rest) = target.strip_prefix('.') {
        rest
    } else {
        target
    }
}

/// True when `path` is `…<normalized>.<ext>` for `path`'s own extension
fn ends_with_own_extension(path: &str, normalized: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, extension)) => path.ends_with(&format!("{normalized}.{extension}")),
        None => false,
    }
}
