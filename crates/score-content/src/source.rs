//! Markdown source discovery and registry loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ContentError;
use crate::document::{DocumentOptions, parse_document};
use crate::registry::ContentRegistry;

/// Compile every markdown file under `source_dir` into a [`ContentRegistry`].
///
/// Files are registered in path order. Hidden and underscore-prefixed entries
/// are skipped. Compiler warnings are logged, not returned.
pub fn load_dir(
    source_dir: &Path,
    options: &DocumentOptions,
) -> Result<ContentRegistry, ContentError> {
    if !source_dir.is_dir() {
        return Err(ContentError::SourceNotFound(source_dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    collect_sources(source_dir, Path::new(""), &mut sources)?;

    let mut registry = ContentRegistry::new();
    for relative in sources {
        let full_path = source_dir.join(&relative);
        let markdown = fs::read_to_string(&full_path).map_err(|source| ContentError::Io {
            path: full_path.clone(),
            source,
        })?;

        let parsed =
            parse_document(&relative, &markdown, options).map_err(|e| ContentError::Source {
                path: relative.clone(),
                source: Box::new(e),
            })?;
        for warning in &parsed.warnings {
            tracing::warn!(path = %relative.display(), "{warning}");
        }
        tracing::debug!(
            id = %parsed.document.id,
            permalink = %parsed.document.permalink,
            "Registered document"
        );
        registry.insert(parsed.document, parsed.content)?;
    }

    Ok(registry)
}

/// Recursively collect markdown paths relative to the source root, sorted.
fn collect_sources(
    root: &Path,
    relative: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<(), ContentError> {
    let dir = root.join(relative);
    let entries = fs::read_dir(&dir).map_err(|source| ContentError::Io {
        path: dir.clone(),
        source,
    })?;

    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        // Skip hidden and underscore-prefixed files/dirs
        if name_str.starts_with('.') || name_str.starts_with('_') {
            continue;
        }

        let child = relative.join(&name);
        let path = entry.path();
        if path.is_dir() {
            collect_sources(root, &child, out)?;
        } else if path.extension().is_some_and(|e| e == "md" || e == "mdx") {
            out.push(child);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[test]
    fn test_load_dir_missing_source() {
        let temp = tempfile::tempdir().unwrap();

        let err = load_dir(&temp.path().join("nope"), &DocumentOptions::default()).unwrap_err();

        assert!(matches!(err, ContentError::SourceNotFound(_)));
    }

    #[test]
    fn test_load_dir_registers_in_path_order() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "schema.md", "# Schema");
        write(temp.path(), "guides/installation.md", "# Installation");
        write(temp.path(), "intro.md", "# Introduction");
        write(temp.path(), "_draft.md", "# Draft");
        write(temp.path(), ".hidden/secret.md", "# Secret");
        write(temp.path(), "notes.txt", "not markdown");

        let registry = load_dir(temp.path(), &DocumentOptions::default()).unwrap();

        let ids: Vec<_> = registry.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["guides/installation", "intro", "schema"]);
    }

    #[test]
    fn test_load_dir_reports_source_of_bad_front_matter() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "bad.md", "---\nsidebar_position: first\n---\n");

        let err = load_dir(temp.path(), &DocumentOptions::default()).unwrap_err();

        assert!(err.to_string().starts_with("bad.md:"));
    }

    #[test]
    fn test_load_dir_duplicate_id() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "a.md", "---\nid: same\n---\n");
        write(temp.path(), "b.md", "---\nid: same\nslug: /b\n---\n");

        let err = load_dir(temp.path(), &DocumentOptions::default()).unwrap_err();

        assert!(matches!(err, ContentError::DuplicateId { .. }));
    }
}
