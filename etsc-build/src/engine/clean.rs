use std::{io, path::Path};

use tracing::debug;

use crate::BuildError;

/// Remove a directory tree.
///
/// Returns `false` if there was nothing to remove.
pub fn clean_output_dir(path: &Path) -> Result<bool, BuildError> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed output directory");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(BuildError::Clean {
            path: path.to_path_buf(),
            source,
        }),
    }
}
