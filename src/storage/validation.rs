//! Path containment validation
//!
//! Resolves untrusted logical paths against the server root and rejects
//! anything that would escape it. This is the single security check of the
//! server; every filesystem-touching operation goes through it before any
//! I/O happens.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Outcome of resolving a logical path against the server root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path stays inside the root; holds the absolute filesystem path.
    Allowed(PathBuf),
    /// The path would escape the root.
    Rejected,
}

impl Resolution {
    pub fn into_allowed(self) -> Option<PathBuf> {
        match self {
            Resolution::Allowed(path) => Some(path),
            Resolution::Rejected => None,
        }
    }
}

/// Resolves an untrusted logical path against `root`.
///
/// The logical path is appended to `root` component by component with `.`
/// and `..` collapsed lexically, so validation needs no filesystem access
/// and the target does not have to exist yet. Leading separators are
/// ignored (`/docs` and `docs` name the same entry), matching ordinary
/// join semantics for a relative request path. Any `..` that would climb
/// above the root is rejected, as is a Windows-style drive prefix.
///
/// The result is re-checked against `root` component-wise, so a sibling
/// directory such as `/srv/files-other` can never pass for a root of
/// `/srv/files`.
pub fn resolve_logical_path(root: &Path, logical: &str) -> Resolution {
    let mut kept: Vec<&OsStr> = Vec::new();

    for component in Path::new(logical).components() {
        match component {
            Component::Normal(part) => kept.push(part),
            Component::ParentDir => {
                if kept.pop().is_none() {
                    return Resolution::Rejected;
                }
            }
            Component::CurDir | Component::RootDir => {}
            Component::Prefix(_) => return Resolution::Rejected,
        }
    }

    let mut resolved = root.to_path_buf();
    for part in kept {
        resolved.push(part);
    }

    // starts_with compares whole path components, not raw bytes.
    if resolved.starts_with(root) {
        Resolution::Allowed(resolved)
    } else {
        Resolution::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> &'static Path {
        Path::new("/srv/files")
    }

    #[test]
    fn test_empty_path_resolves_to_root() {
        assert_eq!(
            resolve_logical_path(root(), ""),
            Resolution::Allowed(PathBuf::from("/srv/files"))
        );
        assert_eq!(
            resolve_logical_path(root(), "."),
            Resolution::Allowed(PathBuf::from("/srv/files"))
        );
    }

    #[test]
    fn test_nested_path_resolves_under_root() {
        let resolved = resolve_logical_path(root(), "docs/reports/a.txt");
        assert_eq!(
            resolved,
            Resolution::Allowed(PathBuf::from("/srv/files/docs/reports/a.txt"))
        );
    }

    #[test]
    fn test_resolved_path_has_no_residual_dot_segments() {
        let path = resolve_logical_path(root(), "./docs/./sub/../a.txt")
            .into_allowed()
            .unwrap();
        assert_eq!(path, PathBuf::from("/srv/files/docs/a.txt"));
        assert!(path.components().all(|c| matches!(c, Component::Normal(_) | Component::RootDir)));
        assert!(path.starts_with(root()));
    }

    #[test]
    fn test_parent_traversal_is_rejected() {
        assert_eq!(resolve_logical_path(root(), ".."), Resolution::Rejected);
        assert_eq!(resolve_logical_path(root(), "../"), Resolution::Rejected);
        assert_eq!(
            resolve_logical_path(root(), "../../etc"),
            Resolution::Rejected
        );
        assert_eq!(
            resolve_logical_path(root(), "docs/../../outside"),
            Resolution::Rejected
        );
    }

    #[test]
    fn test_interior_parent_segments_collapse() {
        assert_eq!(
            resolve_logical_path(root(), "docs/sub/../a.txt"),
            Resolution::Allowed(PathBuf::from("/srv/files/docs/a.txt"))
        );
        // Climbs to the root itself but never above it.
        assert_eq!(
            resolve_logical_path(root(), "docs/.."),
            Resolution::Allowed(PathBuf::from("/srv/files"))
        );
    }

    #[test]
    fn test_sibling_prefix_cannot_escape() {
        // "/srv/files-other" shares a string prefix with the root but is a
        // different directory; no logical path may reach it.
        assert_eq!(
            resolve_logical_path(root(), "../files-other"),
            Resolution::Rejected
        );
        assert_eq!(
            resolve_logical_path(root(), "../files-other/secret.txt"),
            Resolution::Rejected
        );
    }

    #[test]
    fn test_absolute_looking_path_is_treated_as_relative() {
        // A leading separator does not reset resolution to the filesystem
        // root; the request stays scoped beneath the server root.
        assert_eq!(
            resolve_logical_path(root(), "/etc/passwd"),
            Resolution::Allowed(PathBuf::from("/srv/files/etc/passwd"))
        );
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(
            resolve_logical_path(root(), "docs//sub///a.txt"),
            Resolution::Allowed(PathBuf::from("/srv/files/docs/sub/a.txt"))
        );
    }
}
