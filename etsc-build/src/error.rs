use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::HookKind;

/// A failed build step.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("failed to clean '{}'", .path.display())]
    #[diagnostic(code(etsc::clean_failed))]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to clean '{}': it contains the project root", .path.display())]
    #[diagnostic(
        code(etsc::clean_refused),
        help("point outDir at a dedicated build directory such as 'dist'")
    )]
    CleanRefused { path: PathBuf },

    #[error("{kind} hook `{command}` failed: {reason}")]
    #[diagnostic(code(etsc::hook_failed))]
    Hook {
        kind: HookKind,
        command: String,
        reason: String,
    },

    #[error("compilation failed: {reason}")]
    #[diagnostic(code(etsc::compile_failed))]
    Compile {
        reason: String,
        /// Bundler output explaining the failure.
        #[help]
        output: Option<String>,
    },

    #[error("failed to copy asset '{}'", .path.display())]
    #[diagnostic(code(etsc::copy_failed))]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid asset pattern '{pattern}'")]
    #[diagnostic(code(etsc::invalid_asset_pattern))]
    AssetPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

impl BuildError {
    /// Whether the error came from the compile branch.
    pub fn is_compile(&self) -> bool {
        matches!(self, BuildError::Compile { .. })
    }

    /// Whether the error came from the asset-copy branch.
    pub fn is_copy(&self) -> bool {
        matches!(
            self,
            BuildError::Copy { .. } | BuildError::AssetPattern { .. }
        )
    }
}

/// Every error of a failed build, reported together.
#[derive(Debug, Error, Diagnostic)]
#[error("build failed")]
#[diagnostic(code(etsc::build_failed))]
pub struct BuildFailed {
    #[related]
    pub errors: Vec<BuildError>,
}
