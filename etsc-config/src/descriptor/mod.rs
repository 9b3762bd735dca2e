//! The TypeScript project descriptor (`tsconfig.json`).
//!
//! [`ProjectDescriptor::load`] finds the descriptor by walking up from a
//! working directory, parses it with JSON-with-comments semantics, applies its
//! `extends` chain, and expands the source file list.

mod discover;
mod files;
mod raw;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use discover::{DEFAULT_DESCRIPTOR_NAME, find_config_file};
use crate::{Error, Result, path::normalize};

/// The compiler options the build driver cares about.
///
/// Paths are absolute, resolved against the file that declared them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    pub out_dir: Option<PathBuf>,
    pub root_dir: Option<PathBuf>,
    pub source_map: Option<bool>,
    pub inline_source_map: Option<bool>,
    pub inline_sources: Option<bool>,
    /// Language level exactly as written, e.g. `"ES2020"`.
    pub target: Option<String>,
    pub allow_js: Option<bool>,
}

impl CompilerOptions {
    /// Layer `child` over `self`, field by field.
    pub fn overlay(self, child: CompilerOptions) -> CompilerOptions {
        CompilerOptions {
            out_dir: child.out_dir.or(self.out_dir),
            root_dir: child.root_dir.or(self.root_dir),
            source_map: child.source_map.or(self.source_map),
            inline_source_map: child.inline_source_map.or(self.inline_source_map),
            inline_sources: child.inline_sources.or(self.inline_sources),
            target: child.target.or(self.target),
            allow_js: child.allow_js.or(self.allow_js),
        }
    }
}

/// A parsed project descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub compiler_options: CompilerOptions,
    /// Source files in compiler order.
    pub file_names: Vec<PathBuf>,
    /// The descriptor file that was loaded.
    pub path: PathBuf,
}

impl ProjectDescriptor {
    /// Find and parse the project descriptor.
    ///
    /// `name` defaults to [`DEFAULT_DESCRIPTOR_NAME`]. The search starts in
    /// `cwd` and continues through its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if no descriptor exists, or a parse
    /// error if the descriptor (or anything it extends) is malformed.
    pub fn load(cwd: &Path, name: Option<&str>) -> Result<Self> {
        let name = name.unwrap_or(DEFAULT_DESCRIPTOR_NAME);
        let path = find_config_file(cwd, name)
            .map(|p| normalize(&p))
            .ok_or_else(|| Error::config_not_found(name, cwd))?;
        debug!(path = %path.display(), "found project descriptor");

        Self::open(&path)
    }

    /// Parse the descriptor at a known path.
    pub fn open(path: &Path) -> Result<Self> {
        let dir = path.parent().unwrap_or(Path::new("."));
        let merged = raw::read_merged(path)?;
        let file_names = files::collect_file_names(&merged, dir, path)?;
        if file_names.is_empty() {
            warn!(path = %path.display(), "no inputs were found in project descriptor");
        }

        Ok(Self {
            compiler_options: merged.compiler_options,
            file_names,
            path: path.to_path_buf(),
        })
    }

    /// Directory containing the descriptor.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}
