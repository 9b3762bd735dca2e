//! Versioned user config shapes.
//!
//! Early config files put bundler settings under a top-level `esbuild` table
//! and named hooks `prebuild`/`postbuild`. Both shapes are accepted and
//! normalized into [`UserConfig`] right after parsing.

use std::sync::Once;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{AssetsConfig, BundlerOptions, FileFormat, UserConfig};
use crate::{Result, SourceContext};

/// Top-level field that only the legacy shape has.
const LEGACY_MARKER: &str = "esbuild";

static LEGACY_NOTICE: Once = Once::new();

/// A user config file as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum UserConfigFile {
    /// Legacy shape, detected by a top-level `esbuild` table.
    V1(LegacyConfig),
    /// Current shape.
    V2(UserConfig),
}

/// The legacy config shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    pub out_dir: Option<String>,
    pub clean: Option<bool>,
    pub ts_config_file: Option<String>,
    #[serde(default)]
    pub esbuild: BundlerOptions,
    #[serde(default)]
    pub assets: AssetsConfig,
    pub prebuild: Option<String>,
    pub postbuild: Option<String>,
}

impl UserConfigFile {
    /// Parse a config document and detect its shape.
    pub fn parse(ctx: &SourceContext, format: FileFormat) -> Result<Self> {
        let value = if ctx.src().trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match format {
                FileFormat::Toml => toml::from_str(ctx.src()).map_err(|e| ctx.toml_error(e))?,
                FileFormat::Json => json5::from_str(ctx.src()).map_err(|e| ctx.json_error(e))?,
            }
        };

        let Value::Object(ref map) = value else {
            return Err(ctx.shape_error("expected a table of settings at the top level"));
        };

        if map.contains_key(LEGACY_MARKER) {
            serde_json::from_value(value)
                .map(UserConfigFile::V1)
                .map_err(|e| ctx.shape_error(e.to_string()))
        } else {
            serde_json::from_value(value)
                .map(UserConfigFile::V2)
                .map_err(|e| ctx.shape_error(e.to_string()))
        }
    }

    /// Whether this is the legacy shape.
    pub fn is_legacy(&self) -> bool {
        matches!(self, UserConfigFile::V1(_))
    }

    /// Convert into the current shape. Warns once per process about legacy
    /// files.
    pub fn normalize(self) -> UserConfig {
        let mut config = match self {
            UserConfigFile::V2(config) => config,
            UserConfigFile::V1(legacy) => {
                LEGACY_NOTICE.call_once(|| {
                    warn!(
                        "the `esbuild` config table is deprecated; rename it to `bundlerOptions`, \
                         `tsConfigFile` to `projectDescriptorPath` and \
                         `prebuild`/`postbuild` to `prebuildHook`/`postbuildHook`"
                    );
                });
                legacy.into()
            }
        };
        config.bundler_options.drop_reserved();
        config
    }
}

impl From<LegacyConfig> for UserConfig {
    fn from(legacy: LegacyConfig) -> Self {
        let mut bundler_options = legacy.esbuild;
        let legacy_out_dir = bundler_options.outdir.take();

        UserConfig {
            out_dir: legacy.out_dir.or(legacy_out_dir),
            clean: legacy.clean,
            project_descriptor_path: legacy.ts_config_file,
            bundler_options,
            assets: legacy.assets,
            prebuild_hook: legacy.prebuild,
            postbuild_hook: legacy.postbuild,
        }
    }
}
