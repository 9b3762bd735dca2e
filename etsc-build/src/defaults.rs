//! Built-in fallbacks used when neither the user config nor the project
//! descriptor sets a value.

use etsc_core::{Format, Platform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub out_dir: String,
    pub target: String,
    pub format: Format,
    pub platform: Platform,
    pub minify: bool,
    pub assets_base_dir: String,
    pub asset_patterns: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            out_dir: "dist".to_string(),
            target: "es2015".to_string(),
            format: Format::Cjs,
            platform: Platform::Node,
            minify: false,
            assets_base_dir: "src".to_string(),
            asset_patterns: vec!["**".to_string()],
        }
    }
}
