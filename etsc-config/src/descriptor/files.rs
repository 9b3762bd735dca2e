//! Expanding `files` / `include` / `exclude` into the project's source list.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use etsc_core::{SCRIPT_EXTENSIONS, TYPESCRIPT_EXTENSIONS};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;
use walkdir::WalkDir;

use super::{
    CompilerOptions,
    raw::{MergedConfig, PatternList},
};
use crate::{
    Error, Result,
    path::{normalize, relative_slash},
};

/// Directories excluded when the config does not declare `exclude`.
const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// Collect the source files a merged config selects.
///
/// Explicit `files` come first, in declaration order, followed by every file
/// matched by `include` in lexicographic walk order.
pub(crate) fn collect_file_names(
    config: &MergedConfig,
    config_dir: &Path,
    config_path: &Path,
) -> Result<Vec<PathBuf>> {
    let options = &config.compiler_options;
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    if let Some(files) = &config.files {
        for file in &files.patterns {
            let path = normalize(&files.base.join(file));
            if !path.is_file() {
                warn!(file = %path.display(), "file listed in 'files' does not exist");
                continue;
            }
            if seen.insert(path.clone()) {
                names.push(path);
            }
        }
    }

    let include = match (&config.include, &config.files) {
        (Some(include), _) => Some(include.clone()),
        (None, None) => Some(PatternList {
            base: config_dir.to_path_buf(),
            patterns: vec!["**/*".to_string()],
        }),
        (None, Some(_)) => None,
    };

    let Some(include) = include else {
        return Ok(names);
    };

    let include_set = build_set(
        include.patterns.iter().map(|p| include_glob(p)),
        config_path,
    )?;
    let exclude = Excludes::new(config, config_dir, config_path)?;

    let walker = WalkDir::new(&include.base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !exclude.matches(entry.path()));

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !is_supported(entry.path(), options) {
            continue;
        }
        let Some(rel) = relative_slash(entry.path(), &include.base) else {
            continue;
        };
        if include_set.is_match(&rel) {
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                names.push(path);
            }
        }
    }

    Ok(names)
}

/// Exclusion rules, relative to the directory that declared them.
struct Excludes {
    base: PathBuf,
    set: GlobSet,
    out_dir: Option<PathBuf>,
}

impl Excludes {
    fn new(config: &MergedConfig, config_dir: &Path, config_path: &Path) -> Result<Self> {
        let (base, patterns) = match &config.exclude {
            Some(list) => (list.base.clone(), list.patterns.clone()),
            None => (
                config_dir.to_path_buf(),
                DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            ),
        };

        // An excluded directory hides everything below it.
        let globs = patterns.iter().flat_map(|p| {
            let trimmed = p.trim_end_matches('/').to_string();
            let nested = format!("{}/**", trimmed);
            [trimmed, nested]
        });

        Ok(Self {
            base,
            set: build_set(globs, config_path)?,
            out_dir: config.compiler_options.out_dir.clone(),
        })
    }

    fn matches(&self, path: &Path) -> bool {
        if self.out_dir.as_deref() == Some(path) {
            return true;
        }
        relative_slash(path, &self.base).is_some_and(|rel| self.set.is_match(rel))
    }
}

/// Turn an include entry into a glob. A last segment with neither a wildcard
/// nor an extension names a directory.
fn include_glob(pattern: &str) -> String {
    let trimmed = pattern.trim_start_matches("./").trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let has_wildcard = last.contains('*') || last.contains('?');
    if trimmed.is_empty() || trimmed == "." {
        "**/*".to_string()
    } else if !has_wildcard && !last.contains('.') {
        format!("{}/**/*", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn build_set(patterns: impl IntoIterator<Item = String>, config_path: &Path) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.trim_start_matches("./").to_string();
        let glob = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| {
                Box::new(Error::Pattern {
                    pattern: pattern.clone(),
                    config: config_path.to_path_buf(),
                    source,
                })
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| {
        Box::new(Error::Pattern {
            pattern: String::new(),
            config: config_path.to_path_buf(),
            source,
        })
    })
}

fn is_supported(path: &Path, options: &CompilerOptions) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    TYPESCRIPT_EXTENSIONS.contains(&ext)
        || (options.allow_js.unwrap_or(false) && SCRIPT_EXTENSIONS.contains(&ext))
}
