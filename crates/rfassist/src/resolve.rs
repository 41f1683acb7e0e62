//
// resolve.rs
//
// Resolution of import targets against the filesystem, behind a trait so
// the engines stay testable without touching disk.
//

use std::path::{Component, Path, PathBuf};

use url::Url;

/// Filesystem questions the completion and hyperlink engines need
/// answered about documents and the paths they mention.
pub trait ResourceResolver {
    /// The on-disk file a document URI corresponds to, if any. Untitled
    /// and other non-file documents have none.
    fn file_for(&self, uri: &Url) -> Option<Url>;

    /// Resolve a path written in a suite file against the file it was
    /// written in. Returns `None` for paths that cannot name a file, such
    /// as the empty string.
    fn resolve_relative(&self, base: &Url, target: &str) -> Option<Url>;

    /// Whether the URI points at an existing regular file.
    fn exists(&self, uri: &Url) -> bool;
}

/// The real-filesystem resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResourceResolver;

impl ResourceResolver for FsResourceResolver {
    fn file_for(&self, uri: &Url) -> Option<Url> {
        (uri.scheme() == "file").then(|| uri.clone())
    }

    fn resolve_relative(&self, base: &Url, target: &str) -> Option<Url> {
        if target.is_empty() {
            log::trace!("refusing to resolve an empty path against {base}");
            return None;
        }
        // Suite files occasionally carry Windows separators; Robot treats
        // the two interchangeably.
        let target = target.replace('\\', "/");
        let base_path = base.to_file_path().ok()?;
        let directory = base_path.parent()?;
        let normalized = normalize_path(&directory.join(&target))?;
        Url::from_file_path(normalized).ok()
    }

    fn exists(&self, uri: &Url) -> bool {
        uri.to_file_path().map(|p| p.is_file()).unwrap_or(false)
    }
}

/// Resolve `.` and `..` components without requiring the path to exist,
/// unlike `canonicalize()`. A `..` at the root is dropped rather than
/// carried along.
pub(crate) fn normalize_path(path: &Path) -> Option<PathBuf> {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last() {
                    if matches!(last, Component::Normal(_)) {
                        components.pop();
                    }
                }
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }
    if components.is_empty() {
        return None;
    }
    let mut result = PathBuf::new();
    for c in components {
        result.push(c);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_documents_resolve_to_themselves() {
        let resolver = FsResourceResolver;
        let uri = Url::parse("file:///suite/a.robot").unwrap();
        assert_eq!(resolver.file_for(&uri), Some(uri.clone()));
        let untitled = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(resolver.file_for(&untitled), None);
    }

    #[test]
    fn relative_targets_resolve_beside_the_base_file() {
        let resolver = FsResourceResolver;
        let base = Url::parse("file:///suite/tests/login.robot").unwrap();
        assert_eq!(
            resolver.resolve_relative(&base, "common.robot"),
            Some(Url::parse("file:///suite/tests/common.robot").unwrap())
        );
        assert_eq!(
            resolver.resolve_relative(&base, "../shared/keywords.robot"),
            Some(Url::parse("file:///suite/shared/keywords.robot").unwrap())
        );
        assert_eq!(
            resolver.resolve_relative(&base, "./vars.py"),
            Some(Url::parse("file:///suite/tests/vars.py").unwrap())
        );
    }

    #[test]
    fn backslash_separators_are_accepted() {
        let resolver = FsResourceResolver;
        let base = Url::parse("file:///suite/tests/login.robot").unwrap();
        assert_eq!(
            resolver.resolve_relative(&base, "sub\\common.robot"),
            Some(Url::parse("file:///suite/tests/sub/common.robot").unwrap())
        );
    }

    #[test]
    fn empty_target_resolves_to_nothing() {
        let resolver = FsResourceResolver;
        let base = Url::parse("file:///suite/tests/login.robot").unwrap();
        assert_eq!(resolver.resolve_relative(&base, ""), None);
    }

    #[test]
    fn exists_is_true_only_for_regular_files() {
        let resolver = FsResourceResolver;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("common.robot");
        fs::write(&file_path, "*** Keywords ***\n").unwrap();

        let file_uri = Url::from_file_path(&file_path).unwrap();
        let dir_uri = Url::from_file_path(dir.path()).unwrap();
        let missing_uri = Url::from_file_path(dir.path().join("absent.robot")).unwrap();

        assert!(resolver.exists(&file_uri));
        assert!(!resolver.exists(&dir_uri));
        assert!(!resolver.exists(&missing_uri));
    }

    #[test]
    fn normalize_collapses_dot_and_dotdot() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c/./d")),
            Some(PathBuf::from("/a/c/d"))
        );
        assert_eq!(
            normalize_path(Path::new("/a/../../b")),
            Some(PathBuf::from("/b"))
        );
        assert_eq!(normalize_path(Path::new(".")), None);
    }

    #[test]
    fn resolution_against_a_real_tree() {
        let resolver = FsResourceResolver;
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("shared")).unwrap();
        let target = dir.path().join("shared").join("common.robot");
        fs::write(&target, "*** Keywords ***\n").unwrap();
        let base_path = dir.path().join("tests").join("login.robot");
        fs::create_dir(dir.path().join("tests")).unwrap();
        fs::write(&base_path, "").unwrap();

        let base = Url::from_file_path(&base_path).unwrap();
        let resolved = resolver
            .resolve_relative(&base, "../shared/common.robot")
            .unwrap();
        assert!(resolver.exists(&resolved));
        assert_eq!(resolved.to_file_path().unwrap(), target);
    }
}
