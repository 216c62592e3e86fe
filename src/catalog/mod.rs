//! Template discovery on disk.
//!
//! Produces the ordered list of files beneath a template root and answers
//! the two questions the aggregator asks about each one: which top-level
//! directory it belongs to, and whether it is a template document at all.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, StatsError};

/// Collect every regular file beneath `root`, sorted by file name per directory.
///
/// Hidden entries are walked unless `include_hidden` is cleared. Failing to read
/// the root itself is fatal; unreadable entries further down are logged.
pub fn discover(root: &Path, include_hidden: bool) -> Result<Vec<PathBuf>> {
    std::fs::read_dir(root).map_err(|e| StatsError::Walk {
        root: root.display().to_string(),
        message: e.to_string(),
    })?;

    let walker = ignore::WalkBuilder::new(root)
        .hidden(!include_hidden)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "could not read directory entry, skipping");
                continue;
            }
        };
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// First path segment of `path` relative to `root`.
///
/// A file directly under the root is its own label.
pub fn directory_label(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .find_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Case-insensitive extension check against the recognized template extensions.
pub fn is_template(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|known| *known == ext))
}

/// Read the newline-delimited list of added template paths. Blank lines are dropped.
pub fn read_additions(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| StatsError::AdditionsFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml() -> Vec<String> {
        vec!["yaml".to_string()]
    }

    #[test]
    fn discovers_nested_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("cves/2021")).unwrap();
        std::fs::create_dir_all(dir.path().join("dns")).unwrap();
        std::fs::write(dir.path().join("cves/2021/b.yaml"), "id: b").unwrap();
        std::fs::write(dir.path().join("cves/2021/a.yaml"), "id: a").unwrap();
        std::fs::write(dir.path().join("dns/x.yaml"), "id: x").unwrap();
        std::fs::write(dir.path().join("README.md"), "#").unwrap();

        let files = discover(dir.path(), false).unwrap();
        let relative: Vec<String> = files
            .iter()
            .map(|f| {
                f.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(
            relative,
            vec!["README.md", "cves/2021/a.yaml", "cves/2021/b.yaml", "dns/x.yaml"]
        );
    }

    #[test]
    fn hidden_entries_skipped_only_on_request() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(dir.path().join(".github/ci.yaml"), "on: push").unwrap();
        std::fs::write(dir.path().join("t.yaml"), "id: t").unwrap();

        assert_eq!(discover(dir.path(), false).unwrap().len(), 1);
        assert_eq!(discover(dir.path(), true).unwrap().len(), 2);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("nope"), false).unwrap_err();
        assert!(matches!(err, StatsError::Walk { .. }));
    }

    #[test]
    fn directory_label_is_first_segment() {
        let root = Path::new("/t");
        assert_eq!(directory_label(root, Path::new("/t/cves/2021/x.yaml")), "cves");
        assert_eq!(directory_label(root, Path::new("/t/top.yaml")), "top.yaml");
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_template(Path::new("a/B.YAML"), &yaml()));
        assert!(!is_template(Path::new("a/b.yml"), &yaml()));
        assert!(!is_template(Path::new("a/yaml"), &yaml()));
    }

    #[test]
    fn additions_skip_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("additions.txt");
        std::fs::write(&path, "cves/a.yaml\r\n\n  \ndns/b.yaml\n").unwrap();
        assert_eq!(
            read_additions(&path).unwrap(),
            vec!["cves/a.yaml".to_string(), "dns/b.yaml".to_string()]
        );
    }

    #[test]
    fn missing_additions_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_additions(&dir.path().join("none.txt")).unwrap_err();
        assert!(matches!(err, StatsError::AdditionsFile { .. }));
    }
}
