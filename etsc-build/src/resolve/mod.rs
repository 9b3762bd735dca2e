//! Merge the project descriptor, the user config and built-in defaults into
//! one [`ResolvedBuildConfig`].
//!
//! Resolution is pure: no filesystem access, and the same inputs always give
//! an equal result. Relative paths from the user config are anchored at the
//! project root, the directory holding the descriptor.

mod assets;
mod source_map;

use std::path::{Path, PathBuf};

use etsc_config::{ProjectDescriptor, UserConfig, normalize_path};
use etsc_core::{Format, Platform, SourceMapMode, is_reserved_bundler_option};
use indexmap::IndexMap;

pub use assets::{AssetMatcher, AssetsSpec};
pub use source_map::source_map_mode;
use crate::{Defaults, Hook, HookKind};

/// Every parameter a build needs, fully decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBuildConfig {
    /// Directory holding the descriptor; hooks and the bundler run here.
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
    /// Descriptor files first, then user entries. Duplicates are kept.
    pub entry_points: Vec<PathBuf>,
    pub source_map: SourceMapMode,
    /// Lower-cased language level, e.g. `es2020`.
    pub target: String,
    pub minify: bool,
    pub format: Format,
    pub platform: Platform,
    pub plugins: Vec<String>,
    pub descriptor_path: PathBuf,
    /// Common ancestor for output layout, from the descriptor's `rootDir`.
    pub outbase: Option<PathBuf>,
    pub assets: AssetsSpec,
    pub clean: bool,
    pub prebuild: Option<Hook>,
    pub postbuild: Option<Hook>,
    /// Bundler options passed through untouched, in declaration order.
    pub extra_options: IndexMap<String, serde_json::Value>,
    pub bundler_binary: Option<PathBuf>,
}

/// Resolve the build parameters.
pub fn resolve(
    descriptor: &ProjectDescriptor,
    user: &UserConfig,
    defaults: &Defaults,
) -> ResolvedBuildConfig {
    let root = descriptor.dir().to_path_buf();
    let options = &descriptor.compiler_options;
    let bundler = &user.bundler_options;

    // descriptor wins over the user for outDir
    let output_dir = match &options.out_dir {
        Some(dir) => dir.clone(),
        None => [user.out_dir.as_deref(), bundler.outdir.as_deref()]
            .into_iter()
            .flatten()
            .find(|dir| !dir.trim().is_empty())
            .map(|dir| anchor(&root, dir))
            .unwrap_or_else(|| anchor(&root, &defaults.out_dir)),
    };

    let entry_points = descriptor
        .file_names
        .iter()
        .cloned()
        .chain(
            bundler
                .entry_points
                .iter()
                .flatten()
                .map(|entry| anchor(&root, entry)),
        )
        .collect();

    let source_map = match source_map_mode(options) {
        SourceMapMode::Off => bundler.sourcemap.unwrap_or(SourceMapMode::Off),
        mode => mode,
    };

    let target = options
        .target
        .as_deref()
        .or(bundler.target.as_deref())
        .unwrap_or(&defaults.target)
        .to_lowercase();

    let assets_output = user
        .assets
        .out_dir
        .as_deref()
        .map(|dir| anchor(&root, dir))
        .unwrap_or_else(|| output_dir.clone());
    let assets = AssetsSpec::new(
        anchor(
            &root,
            user.assets
                .base_dir
                .as_deref()
                .unwrap_or(&defaults.assets_base_dir),
        ),
        assets_output,
        user.assets
            .file_patterns
            .clone()
            .unwrap_or_else(|| defaults.asset_patterns.clone()),
    );

    ResolvedBuildConfig {
        output_dir,
        entry_points,
        source_map,
        target,
        minify: bundler.minify.unwrap_or(defaults.minify),
        format: bundler.format.unwrap_or(defaults.format),
        platform: bundler.platform.unwrap_or(defaults.platform),
        plugins: bundler.plugins.clone().unwrap_or_default(),
        descriptor_path: descriptor.path.clone(),
        outbase: options.root_dir.clone(),
        assets,
        clean: user.clean.unwrap_or(false),
        prebuild: user
            .prebuild_hook
            .as_deref()
            .and_then(|cmd| Hook::new(HookKind::Prebuild, cmd)),
        postbuild: user
            .postbuild_hook
            .as_deref()
            .and_then(|cmd| Hook::new(HookKind::Postbuild, cmd)),
        extra_options: bundler
            .extra
            .iter()
            .filter(|(key, _)| !is_reserved_bundler_option(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        bundler_binary: bundler.binary.as_deref().map(|bin| binary_path(&root, bin)),
        project_root: root,
    }
}

fn anchor(root: &Path, path: &str) -> PathBuf {
    normalize_path(&root.join(path))
}

// a bare command name is looked up on PATH
fn binary_path(root: &Path, bin: &str) -> PathBuf {
    if Path::new(bin).components().count() > 1 {
        anchor(root, bin)
    } else {
        PathBuf::from(bin)
    }
}

#[cfg(test)]
mod tests {
    use etsc_config::CompilerOptions;

    use super::*;

    fn descriptor(options: CompilerOptions, files: &[&str]) -> ProjectDescriptor {
        ProjectDescriptor {
            compiler_options: options,
            file_names: files.iter().map(|f| PathBuf::from("/p").join(f)).collect(),
            path: PathBuf::from("/p/tsconfig.json"),
        }
    }

    fn user(toml: &str) -> UserConfig {
        UserConfig::from_toml_str(toml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &UserConfig::default(),
            &Defaults::default(),
        );

        assert_eq!(config.project_root, PathBuf::from("/p"));
        assert_eq!(config.output_dir, PathBuf::from("/p/dist"));
        assert_eq!(config.source_map, SourceMapMode::Off);
        assert_eq!(config.target, "es2015");
        assert!(!config.minify);
        assert_eq!(config.format, Format::Cjs);
        assert_eq!(config.platform, Platform::Node);
        assert!(config.plugins.is_empty());
        assert!(!config.clean);
        assert!(config.prebuild.is_none());
        assert!(config.postbuild.is_none());
        assert_eq!(config.assets.base_dir, PathBuf::from("/p/src"));
        assert_eq!(config.assets.output_dir, PathBuf::from("/p/dist"));
        assert_eq!(config.assets.patterns(), &["**", "!**/*.{ts,js,tsx,jsx}"]);
        assert_eq!(config.descriptor_path, PathBuf::from("/p/tsconfig.json"));
    }

    #[test]
    fn test_descriptor_out_dir_beats_user() {
        let options = CompilerOptions {
            out_dir: Some(PathBuf::from("/p/lib")),
            ..Default::default()
        };
        let config = resolve(
            &descriptor(options, &[]),
            &user(r#"outDir = "dist""#),
            &Defaults::default(),
        );

        assert_eq!(config.output_dir, PathBuf::from("/p/lib"));
        assert_eq!(config.assets.output_dir, PathBuf::from("/p/lib"));
    }

    #[test]
    fn test_user_out_dir_without_descriptor_out_dir() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user(r#"outDir = "build""#),
            &Defaults::default(),
        );

        assert_eq!(config.output_dir, PathBuf::from("/p/build"));
    }

    #[test]
    fn test_bundler_outdir_is_user_fallback() {
        let bundler_outdir = user(
            r#"
            [bundlerOptions]
            outdir = "elsewhere"
            bundle = true
            "#,
        );

        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &bundler_outdir,
            &Defaults::default(),
        );
        assert_eq!(config.output_dir, PathBuf::from("/p/elsewhere"));
        assert!(config.extra_options.is_empty());

        let options = CompilerOptions {
            out_dir: Some(PathBuf::from("/p/lib")),
            ..Default::default()
        };
        let config = resolve(&descriptor(options, &[]), &bundler_outdir, &Defaults::default());
        assert_eq!(config.output_dir, PathBuf::from("/p/lib"));

        let both = user(
            r#"
            outDir = "build"
            [bundlerOptions]
            outdir = "elsewhere"
            "#,
        );
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &both,
            &Defaults::default(),
        );
        assert_eq!(config.output_dir, PathBuf::from("/p/build"));
    }

    #[test]
    fn test_reserved_extra_options_filtered() {
        let mut user = UserConfig::default();
        user.bundler_options
            .extra
            .insert("bundle".into(), serde_json::json!(true));
        user.bundler_options
            .extra
            .insert("logLevel".into(), serde_json::json!("info"));

        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user,
            &Defaults::default(),
        );
        assert_eq!(
            config.extra_options.keys().collect::<Vec<_>>(),
            vec!["logLevel"]
        );
    }

    #[test]
    fn test_entry_points_union() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &["a.ts", "b.ts"]),
            &user(
                r#"
                [bundlerOptions]
                entryPoints = ["c.ts", "a.ts"]
                "#,
            ),
            &Defaults::default(),
        );

        assert_eq!(
            config.entry_points,
            vec![
                PathBuf::from("/p/a.ts"),
                PathBuf::from("/p/b.ts"),
                PathBuf::from("/p/c.ts"),
                PathBuf::from("/p/a.ts"),
            ]
        );
    }

    #[test]
    fn test_descriptor_source_map_kept() {
        let options = CompilerOptions {
            inline_source_map: Some(true),
            ..Default::default()
        };
        let config = resolve(
            &descriptor(options, &[]),
            &user(
                r#"
                [bundlerOptions]
                sourcemap = "external"
                "#,
            ),
            &Defaults::default(),
        );

        assert_eq!(config.source_map, SourceMapMode::Inline);
    }

    #[test]
    fn test_user_source_map_when_descriptor_off() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user(
                r#"
                [bundlerOptions]
                sourcemap = true
                "#,
            ),
            &Defaults::default(),
        );

        assert_eq!(config.source_map, SourceMapMode::External);
    }

    #[test]
    fn test_target_lowercased() {
        let options = CompilerOptions {
            target: Some("ES2020".into()),
            ..Default::default()
        };
        let with_descriptor = resolve(
            &descriptor(options, &[]),
            &user(
                r#"
                [bundlerOptions]
                target = "ES2017"
                "#,
            ),
            &Defaults::default(),
        );
        assert_eq!(with_descriptor.target, "es2020");

        let user_only = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user(
                r#"
                [bundlerOptions]
                target = "ESNext"
                "#,
            ),
            &Defaults::default(),
        );
        assert_eq!(user_only.target, "esnext");
    }

    #[test]
    fn test_user_overrides() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user(
                r#"
                clean = true
                prebuildHook = "echo pre"
                postbuildHook = "   "

                [bundlerOptions]
                minify = true
                format = "esm"
                platform = "browser"
                plugins = ["svg"]
                binary = "tools/esbuild"
                logLevel = "info"
                charset = "utf8"

                [assets]
                baseDir = "static"
                outDir = "public"
                filePatterns = ["**/*.png"]
                "#,
            ),
            &Defaults::default(),
        );

        assert!(config.minify);
        assert!(config.clean);
        assert_eq!(config.format, Format::Esm);
        assert_eq!(config.platform, Platform::Browser);
        assert_eq!(config.plugins, vec!["svg".to_string()]);
        assert_eq!(
            config.bundler_binary,
            Some(PathBuf::from("/p/tools/esbuild"))
        );
        assert_eq!(
            config.prebuild,
            Some(Hook {
                kind: HookKind::Prebuild,
                command: "echo pre".into()
            })
        );
        assert!(config.postbuild.is_none());
        assert_eq!(
            config.extra_options.keys().collect::<Vec<_>>(),
            vec!["logLevel", "charset"]
        );
        assert_eq!(config.assets.base_dir, PathBuf::from("/p/static"));
        assert_eq!(config.assets.output_dir, PathBuf::from("/p/public"));
        assert_eq!(
            config.assets.patterns(),
            &["**/*.png", "!**/*.{ts,js,tsx,jsx}"]
        );
    }

    #[test]
    fn test_user_paths_normalized() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user(
                r#"
                outDir = "./build/../out"
                [assets]
                baseDir = "./static"
                "#,
            ),
            &Defaults::default(),
        );

        assert_eq!(config.output_dir, PathBuf::from("/p/out"));
        assert_eq!(config.assets.base_dir, PathBuf::from("/p/static"));
    }

    #[test]
    fn test_bare_binary_name_kept() {
        let config = resolve(
            &descriptor(CompilerOptions::default(), &[]),
            &user(
                r#"
                [bundlerOptions]
                binary = "esbuild"
                "#,
            ),
            &Defaults::default(),
        );

        assert_eq!(config.bundler_binary, Some(PathBuf::from("esbuild")));
    }

    #[test]
    fn test_outbase_from_root_dir() {
        let options = CompilerOptions {
            root_dir: Some(PathBuf::from("/p/src")),
            ..Default::default()
        };
        let config = resolve(
            &descriptor(options, &[]),
            &UserConfig::default(),
            &Defaults::default(),
        );

        assert_eq!(config.outbase, Some(PathBuf::from("/p/src")));
    }

    #[test]
    fn test_idempotent() {
        let options = CompilerOptions {
            source_map: Some(true),
            target: Some("ES2019".into()),
            ..Default::default()
        };
        let descriptor = descriptor(options, &["index.ts"]);
        let user = user(
            r#"
            outDir = "out"
            [bundlerOptions]
            entryPoints = ["bin.ts"]
            keepNames = true
            "#,
        );
        let defaults = Defaults::default();

        assert_eq!(
            resolve(&descriptor, &user, &defaults),
            resolve(&descriptor, &user, &defaults)
        );
    }
}
