use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::host::PathPolicy;

/// Allows paths inside a fixed set of directories.
///
/// A path is resolved before the check: an existing path is canonicalized,
/// a missing one is judged by its canonicalized parent. Symlinks and `..`
/// therefore cannot escape the allow-list.
#[derive(Debug, Clone, Default)]
pub struct AllowListPathPolicy {
    allowed_dirs: Vec<PathBuf>,
}

impl AllowListPathPolicy {
    pub fn new<I, P>(allowed_dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let allowed_dirs = allowed_dirs
            .into_iter()
            .map(Into::into)
            .map(|dir: PathBuf| dir.canonicalize().unwrap_or(dir))
            .collect();
        Self { allowed_dirs }
    }

    pub fn allowed_dirs(&self) -> &[PathBuf] {
        &self.allowed_dirs
    }

    fn resolve(path: &Path) -> Option<PathBuf> {
        if path.exists() {
            return path.canonicalize().ok();
        }
        let parent = path.parent()?.canonicalize().ok()?;
        Some(parent.join(path.file_name()?))
    }
}

impl PathPolicy for AllowListPathPolicy {
    fn is_allowed_path(&self, path: &Path) -> bool {
        let Some(resolved) = Self::resolve(path) else {
            debug!(path = %path.display(), "Path cannot be resolved");
            return false;
        };
        self.allowed_dirs
            .iter()
            .any(|allowed| resolved.starts_with(allowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_inside_allowed_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.jpg");
        std::fs::write(&file, b"x").unwrap();
        let policy = AllowListPathPolicy::new([dir.path()]);

        assert!(policy.is_allowed_path(&file));
        // Not created yet, but its directory is allowed
        assert!(policy.is_allowed_path(&dir.path().join("later.jpg")));
    }

    #[test]
    fn test_paths_outside_allowed_dir() {
        let allowed = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let secret = other.path().join("secret.txt");
        std::fs::write(&secret, b"x").unwrap();
        let policy = AllowListPathPolicy::new([allowed.path()]);

        assert!(!policy.is_allowed_path(&secret));
        assert!(!policy.is_allowed_path(&allowed.path().join("..").join("escape.txt")));
        assert!(!policy.is_allowed_path(Path::new("/no/such/dir/file.txt")));
    }

    #[test]
    fn test_empty_allow_list_denies_everything() {
        let dir = tempfile::tempdir().unwrap();
        let policy = AllowListPathPolicy::default();
        assert!(!policy.is_allowed_path(dir.path()));
    }
}
