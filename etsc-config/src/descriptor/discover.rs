//! Locating a project descriptor on disk.

use std::path::{Path, PathBuf};

/// Default project descriptor filename.
pub const DEFAULT_DESCRIPTOR_NAME: &str = "tsconfig.json";

/// Search `start` and then each ancestor directory for a file called `name`.
///
/// An absolute `name` is checked as-is. Returns the first match, or `None`
/// once the filesystem root has been searched.
pub fn find_config_file(start: &Path, name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(candidate))
        .find(|path| path.is_file())
}
