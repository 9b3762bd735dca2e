//! Asset selection: which non-source files get copied, and where.

use std::path::{Path, PathBuf};

use etsc_core::source_negation_pattern;
use globset::{GlobBuilder, GlobMatcher};

use crate::BuildError;

/// Where assets come from, where they go, and which ones are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsSpec {
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    patterns: Vec<String>,
}

impl AssetsSpec {
    /// Build a spec from user patterns. The source-extension negation is
    /// always appended last, so compiled sources are never copied.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        patterns: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut patterns: Vec<String> = patterns.into_iter().collect();
        patterns.push(source_negation_pattern());
        Self {
            base_dir: base_dir.into(),
            output_dir: output_dir.into(),
            patterns,
        }
    }

    /// Patterns in evaluation order; later `!` entries negate earlier matches.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Compile the patterns for matching.
    pub fn matcher(&self) -> Result<AssetMatcher, BuildError> {
        AssetMatcher::new(&self.patterns)
    }
}

/// Ordered include/exclude glob rules.
#[derive(Debug, Clone)]
pub struct AssetMatcher {
    rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
struct Rule {
    negated: bool,
    glob: GlobMatcher,
}

impl AssetMatcher {
    pub fn new(patterns: &[String]) -> Result<Self, BuildError> {
        let rules = patterns
            .iter()
            .map(|pattern| {
                let (negated, glob) = match pattern.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, pattern.as_str()),
                };
                let glob = glob.trim_start_matches("./");
                GlobBuilder::new(glob)
                    .literal_separator(true)
                    .build()
                    .map(|g| Rule {
                        negated,
                        glob: g.compile_matcher(),
                    })
                    .map_err(|source| BuildError::AssetPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { rules })
    }

    /// Whether a path relative to the asset base directory is selected.
    pub fn is_match(&self, rel: &Path) -> bool {
        self.rules.iter().fold(false, |selected, rule| {
            if rule.glob.is_match(rel) {
                !rule.negated
            } else {
                selected
            }
        })
    }
}
