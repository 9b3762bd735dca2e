//! The optional user configuration file (`etsc.config.toml`).
//!
//! A user config is a convenience: a missing, unreadable or malformed file is
//! reported and replaced with [`UserConfig::default`], never a hard error.

mod shape;

use std::path::Path;

use etsc_core::{Format, Platform, SourceMapMode, is_reserved_bundler_option};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

pub use shape::{LegacyConfig, UserConfigFile};
use crate::{Error, Result, SourceContext};

/// Default user configuration filename.
pub const DEFAULT_USER_CONFIG_NAME: &str = "etsc.config.toml";

/// User overrides. Every field is optional; absence defers to the project
/// descriptor or the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    pub out_dir: Option<String>,
    pub clean: Option<bool>,
    /// Project descriptor filename or path, instead of `tsconfig.json`.
    pub project_descriptor_path: Option<String>,
    #[serde(default)]
    pub bundler_options: BundlerOptions,
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Shell command run before compiling.
    pub prebuild_hook: Option<String>,
    /// Shell command run after a successful build.
    pub postbuild_hook: Option<String>,
}

/// Options forwarded to the bundler.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerOptions {
    /// Entry points compiled in addition to the descriptor's files.
    pub entry_points: Option<Vec<String>>,
    /// Output directory, used when neither the project descriptor nor
    /// `outDir` names one.
    pub outdir: Option<String>,
    pub minify: Option<bool>,
    pub target: Option<String>,
    pub plugins: Option<Vec<String>>,
    pub format: Option<Format>,
    pub sourcemap: Option<SourceMapMode>,
    pub platform: Option<Platform>,
    /// Path to the bundler executable.
    pub binary: Option<String>,
    /// Any other bundler option, passed through in declaration order.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl BundlerOptions {
    /// Drop pass-through options that would override a resolved flag.
    pub fn drop_reserved(&mut self) {
        self.extra.retain(|key, _| {
            let reserved = is_reserved_bundler_option(key);
            if reserved {
                warn!(
                    option = %key,
                    "ignoring bundler option, etsc sets it from the resolved build"
                );
            }
            !reserved
        });
    }
}

/// Non-source files copied into the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsConfig {
    pub base_dir: Option<String>,
    pub out_dir: Option<String>,
    pub file_patterns: Option<Vec<String>>,
}

impl UserConfig {
    /// Load the user config at `path`, falling back to an empty config.
    ///
    /// Never fails: a missing file is logged at debug level, anything else
    /// (unreadable file, syntax error, wrong shape) is logged as a warning.
    pub fn load(path: &Path) -> UserConfig {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %path.display(), "no user config, using defaults");
                UserConfig::default()
            }
            Err(err) => {
                warn!(path = %path.display(), "ignoring user config: {}", err);
                UserConfig::default()
            }
        }
    }

    /// Load the user config at `path`, reporting why it could not be used.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<UserConfig>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        let ctx = SourceContext::new(content, path.display().to_string());
        let file = UserConfigFile::parse(&ctx, FileFormat::from_path(path))?;

        Ok(Some(file.normalize()))
    }

    /// Parse a TOML user config from a string.
    pub fn from_toml_str(content: &str) -> Result<UserConfig> {
        let ctx = SourceContext::new(content, DEFAULT_USER_CONFIG_NAME);
        Ok(UserConfigFile::parse(&ctx, FileFormat::Toml)?.normalize())
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self == &UserConfig::default()
    }
}

/// On-disk syntax of a user config, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json" | "json5" | "jsonc") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}
