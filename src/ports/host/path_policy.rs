use std::path::Path;

/// Decides which local paths actions may read from
pub trait PathPolicy: Send + Sync + 'static {
    fn is_allowed_path(&self, path: &Path) -> bool;
}
