//! Raw tsconfig documents and `extends` resolution.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use super::CompilerOptions;
use crate::{Error, Result, SourceContext, path::normalize};

/// A tsconfig file as written on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    extends: Option<Extends>,
    #[serde(default)]
    compiler_options: RawCompilerOptions,
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(s) => vec![s],
            Extends::Many(v) => v,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    out_dir: Option<String>,
    root_dir: Option<String>,
    source_map: Option<bool>,
    inline_source_map: Option<bool>,
    inline_sources: Option<bool>,
    target: Option<String>,
    allow_js: Option<bool>,
}

impl RawCompilerOptions {
    /// Paths are relative to the file that declares them. A blank path
    /// counts as unset.
    fn resolve(self, dir: &Path) -> CompilerOptions {
        let anchor = |p: Option<String>| {
            p.filter(|p| !p.trim().is_empty())
                .map(|p| normalize(&dir.join(p)))
        };

        CompilerOptions {
            out_dir: anchor(self.out_dir),
            root_dir: anchor(self.root_dir),
            source_map: self.source_map,
            inline_source_map: self.inline_source_map,
            inline_sources: self.inline_sources,
            target: self.target,
            allow_js: self.allow_js,
        }
    }
}

/// A list of patterns together with the directory they are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PatternList {
    pub base: PathBuf,
    pub patterns: Vec<String>,
}

/// A tsconfig with its whole `extends` chain applied.
#[derive(Debug, Default)]
pub(crate) struct MergedConfig {
    pub compiler_options: CompilerOptions,
    pub files: Option<PatternList>,
    pub include: Option<PatternList>,
    pub exclude: Option<PatternList>,
}

impl MergedConfig {
    /// Layer `child` over `self`: child values win, unset ones are inherited.
    fn overlay(self, child: MergedConfig) -> MergedConfig {
        MergedConfig {
            compiler_options: self.compiler_options.overlay(child.compiler_options),
            files: child.files.or(self.files),
            include: child.include.or(self.include),
            exclude: child.exclude.or(self.exclude),
        }
    }
}

/// Read `path` and every config it extends.
pub(crate) fn read_merged(path: &Path) -> Result<MergedConfig> {
    let mut visiting = HashSet::new();
    read_chain(path, &mut visiting)
}

fn read_chain(path: &Path, visiting: &mut HashSet<PathBuf>) -> Result<MergedConfig> {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visiting.insert(key.clone()) {
        return Err(Box::new(Error::CircularExtends {
            path: path.to_path_buf(),
        }));
    }

    let raw = parse_file(path)?;
    let dir = normalize(path.parent().unwrap_or(Path::new(".")));

    let mut merged = MergedConfig::default();
    for specifier in raw.extends.map(Extends::into_vec).unwrap_or_default() {
        let base_path = resolve_extends(&specifier, &dir)?;
        debug!(base = %base_path.display(), from = %path.display(), "following extends");
        merged = merged.overlay(read_chain(&base_path, visiting)?);
    }

    let own = MergedConfig {
        compiler_options: raw.compiler_options.resolve(&dir),
        files: raw.files.map(|patterns| PatternList {
            base: dir.clone(),
            patterns,
        }),
        include: raw.include.map(|patterns| PatternList {
            base: dir.clone(),
            patterns,
        }),
        exclude: raw.exclude.map(|patterns| PatternList {
            base: dir.clone(),
            patterns,
        }),
    };

    visiting.remove(&key);
    Ok(merged.overlay(own))
}

fn parse_file(path: &Path) -> Result<RawTsConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let ctx = SourceContext::new(content, path.display().to_string());
    parse_str(&ctx)
}

fn parse_str(ctx: &SourceContext) -> Result<RawTsConfig> {
    if ctx.src().trim().is_empty() {
        return Ok(RawTsConfig::default());
    }
    json5::from_str(ctx.src()).map_err(|e| ctx.json_error(e))
}

/// Resolve an `extends` specifier the way the TypeScript compiler does.
fn resolve_extends(specifier: &str, from_dir: &Path) -> Result<PathBuf> {
    let is_relative = specifier.starts_with("./")
        || specifier.starts_with("../")
        || Path::new(specifier).is_absolute();

    let found = if is_relative {
        with_json_fallback(&normalize(&from_dir.join(specifier)))
    } else {
        from_dir.ancestors().find_map(|dir| {
            let candidate = dir.join("node_modules").join(specifier);
            with_json_fallback(&candidate).or_else(|| {
                let nested = candidate.join("tsconfig.json");
                nested.is_file().then_some(nested)
            })
        })
    };

    found.ok_or_else(|| {
        Box::new(Error::ExtendsNotFound {
            specifier: specifier.to_string(),
            from: from_dir.to_path_buf(),
        })
    })
}

fn with_json_fallback(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.extension().is_some_and(|ext| ext == "json") {
        return None;
    }
    let mut with_ext = path.as_os_str().to_owned();
    with_ext.push(".json");
    let with_ext = PathBuf::from(with_ext);
    with_ext.is_file().then_some(with_ext)
}
