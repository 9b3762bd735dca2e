//! The external collaborators of a build, behind traits so tests can swap
//! them out.
//!
//! | trait           | default engine        |
//! |-----------------|-----------------------|
//! | [`Bundler`]     | [`EsbuildCli`]        |
//! | [`AssetCopier`] | [`GlobCopier`]        |
//! | [`HookRunner`]  | [`ShellHookRunner`]   |

mod clean;
mod copy;
mod esbuild;
mod shell;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use etsc_core::{Format, Platform, SourceMapMode};
use indexmap::IndexMap;

pub use clean::clean_output_dir;
pub use copy::GlobCopier;
pub use esbuild::EsbuildCli;
pub use shell::ShellHookRunner;
use crate::{AssetsSpec, BuildError, Hook, ResolvedBuildConfig};

/// What the bundler is asked to compile.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleRequest {
    pub working_dir: PathBuf,
    pub entry_points: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub outbase: Option<PathBuf>,
    pub source_map: SourceMapMode,
    pub target: String,
    pub minify: bool,
    pub format: Format,
    pub platform: Platform,
    pub plugins: Vec<String>,
    pub tsconfig: PathBuf,
    pub extra_options: IndexMap<String, serde_json::Value>,
    /// Files are transpiled one to one, never bundled together.
    pub bundle: bool,
}

impl BundleRequest {
    pub fn from_config(config: &ResolvedBuildConfig) -> Self {
        Self {
            working_dir: config.project_root.clone(),
            entry_points: config.entry_points.clone(),
            output_dir: config.output_dir.clone(),
            outbase: config.outbase.clone(),
            source_map: config.source_map,
            target: config.target.clone(),
            minify: config.minify,
            format: config.format,
            platform: config.platform,
            plugins: config.plugins.clone(),
            tsconfig: config.descriptor_path.clone(),
            extra_options: config.extra_options.clone(),
            bundle: false,
        }
    }
}

/// Result of a successful compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleOutput {
    /// Diagnostics the bundler printed without failing.
    pub warnings: Vec<String>,
}

/// Compiles source files.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutput, BuildError>;
}

/// Copies non-source files into the output directory.
#[async_trait]
pub trait AssetCopier: Send + Sync {
    /// Returns the destination paths of every copied file.
    async fn copy(&self, assets: &AssetsSpec) -> Result<Vec<PathBuf>, BuildError>;
}

/// Runs user hooks.
#[async_trait]
pub trait HookRunner: Send + Sync {
    async fn run(&self, hook: &Hook, cwd: &Path) -> Result<(), BuildError>;
}
