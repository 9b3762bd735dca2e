//! Drive the `esbuild` executable as a child process.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use etsc_core::{SourceMapMode, is_declaration_file, is_reserved_bundler_option, to_kebab_case};
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{BundleOutput, BundleRequest, Bundler};
use crate::BuildError;

#[cfg(windows)]
const BINARY_NAME: &str = "esbuild.cmd";
#[cfg(not(windows))]
const BINARY_NAME: &str = "esbuild";

/// The esbuild command-line bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsbuildCli {
    binary: PathBuf,
}

impl EsbuildCli {
    /// Use a specific esbuild executable.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Find esbuild for a project.
    ///
    /// Looks for `node_modules/.bin/esbuild` in `root` and each of its
    /// ancestors, then falls back to `esbuild` on `PATH`.
    pub fn locate(root: &Path) -> Self {
        let local = root
            .ancestors()
            .map(|dir| dir.join("node_modules").join(".bin").join(BINARY_NAME))
            .find(|candidate| candidate.is_file());

        match local {
            Some(binary) => {
                debug!(binary = %binary.display(), "using project esbuild");
                Self::new(binary)
            }
            None => {
                debug!("no project esbuild, falling back to PATH");
                Self::new(BINARY_NAME)
            }
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Render a request as esbuild command-line arguments.
    ///
    /// Declaration files are dropped; they hold no code to emit.
    pub fn args(request: &BundleRequest) -> Vec<String> {
        let mut args: Vec<String> = request
            .entry_points
            .iter()
            .filter(|entry| !is_declaration_file(entry))
            .map(|entry| entry.display().to_string())
            .collect();

        if request.bundle {
            args.push("--bundle".to_string());
        }
        args.push(format!("--outdir={}", request.output_dir.display()));
        if let Some(outbase) = &request.outbase {
            args.push(format!("--outbase={}", outbase.display()));
        }
        match request.source_map {
            SourceMapMode::Off => {}
            SourceMapMode::Inline => args.push("--sourcemap=inline".to_string()),
            SourceMapMode::External => args.push("--sourcemap".to_string()),
        }
        args.push(format!("--target={}", request.target));
        if request.minify {
            args.push("--minify".to_string());
        }
        args.push(format!("--format={}", request.format));
        args.push(format!("--platform={}", request.platform));
        args.push(format!("--tsconfig={}", request.tsconfig.display()));

        let sets_log_level = request
            .extra_options
            .keys()
            .any(|key| to_kebab_case(key) == "log-level");
        if !sets_log_level {
            args.push("--log-level=warning".to_string());
        }

        for (key, value) in &request.extra_options {
            if is_reserved_bundler_option(key) {
                continue;
            }
            push_option(&mut args, &to_kebab_case(key), value);
        }

        args
    }
}

/// Render one pass-through option. Arrays and objects use esbuild's
/// `--flag:item` syntax, once per element.
fn push_option(args: &mut Vec<String>, flag: &str, value: &Value) {
    match value {
        Value::Null | Value::Bool(false) => {}
        Value::Bool(true) => args.push(format!("--{flag}")),
        Value::Array(items) => {
            for item in items {
                args.push(format!("--{flag}:{}", scalar(item)));
            }
        }
        Value::Object(entries) => {
            for (key, item) in entries {
                args.push(format!("--{flag}:{key}={}", scalar(item)));
            }
        }
        other => args.push(format!("--{flag}={}", scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Bundler for EsbuildCli {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutput, BuildError> {
        if request.entry_points.iter().all(|e| is_declaration_file(e)) {
            // esbuild would read from stdin
            warn!("no entry points to compile");
            return Ok(BundleOutput::default());
        }
        if !request.plugins.is_empty() {
            warn!(
                plugins = ?request.plugins,
                "esbuild plugins cannot be loaded from the command line, ignoring"
            );
        }

        let args = Self::args(request);
        debug!(binary = %self.binary.display(), ?args, "running esbuild");

        let output = Command::new(&self.binary)
            .args(&args)
            .current_dir(&request.working_dir)
            .output()
            .await
            .map_err(|err| BuildError::Compile {
                reason: format!("could not run '{}': {err}", self.binary.display()),
                output: None,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(BuildError::Compile {
                reason: format!("esbuild exited with {}", output.status),
                output: (!stderr.is_empty()).then_some(stderr),
            });
        }

        let warnings = stderr
            .lines()
            .filter(|line| line.contains("[WARNING]"))
            .map(|line| line.trim().to_string())
            .collect();

        Ok(BundleOutput { warnings })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use etsc_core::{Format, Platform};
    use indexmap::IndexMap;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn request() -> BundleRequest {
        BundleRequest {
            working_dir: PathBuf::from("/p"),
            entry_points: vec![PathBuf::from("index.ts")],
            output_dir: PathBuf::from("dist"),
            outbase: None,
            source_map: SourceMapMode::Off,
            target: "es2015".into(),
            minify: false,
            format: Format::Cjs,
            platform: Platform::Node,
            plugins: vec![],
            tsconfig: PathBuf::from("tsconfig.json"),
            extra_options: IndexMap::new(),
            bundle: false,
        }
    }

    #[test]
    fn test_args_minimal() {
        insta::assert_snapshot!(EsbuildCli::args(&request()).join("\n"), @r"
        index.ts
        --outdir=dist
        --target=es2015
        --format=cjs
        --platform=node
        --tsconfig=tsconfig.json
        --log-level=warning
        ");
    }

    #[test]
    fn test_args_full() {
        let mut extra = IndexMap::new();
        extra.insert("logLevel".to_string(), json!("info"));
        extra.insert("external".to_string(), json!(["fsevents", "esbuild"]));
        extra.insert("loader".to_string(), json!({ ".png": "file" }));
        extra.insert("keepNames".to_string(), json!(true));
        extra.insert("splitting".to_string(), json!(false));
        extra.insert("logLimit".to_string(), json!(5));

        let request = BundleRequest {
            entry_points: vec![PathBuf::from("src/index.ts"), PathBuf::from("src/cli.ts")],
            outbase: Some(PathBuf::from("src")),
            source_map: SourceMapMode::External,
            target: "es2020".into(),
            minify: true,
            format: Format::Esm,
            extra_options: extra,
            ..request()
        };

        insta::assert_snapshot!(EsbuildCli::args(&request).join("\n"), @r"
        src/index.ts
        src/cli.ts
        --outdir=dist
        --outbase=src
        --sourcemap
        --target=es2020
        --minify
        --format=esm
        --platform=node
        --tsconfig=tsconfig.json
        --log-level=info
        --external:fsevents
        --external:esbuild
        --loader:.png=file
        --keep-names
        --log-limit=5
        ");
    }

    #[test]
    fn test_args_skip_declaration_files() {
        let request = BundleRequest {
            entry_points: vec![PathBuf::from("src/global.d.ts"), PathBuf::from("src/a.ts")],
            ..request()
        };

        let args = EsbuildCli::args(&request);
        assert_eq!(args[0], "src/a.ts");
        assert!(!args.iter().any(|a| a.ends_with(".d.ts")));
    }

    #[test]
    fn test_args_ignore_reserved_extras() {
        let mut extra = IndexMap::new();
        extra.insert("outdir".to_string(), json!("elsewhere"));
        extra.insert("bundle".to_string(), json!(true));
        extra.insert("tsconfig".to_string(), json!("other.json"));
        extra.insert("charset".to_string(), json!("utf8"));
        let request = BundleRequest {
            extra_options: extra,
            ..request()
        };

        let args = EsbuildCli::args(&request);
        let outdirs: Vec<_> = args.iter().filter(|a| a.starts_with("--outdir")).collect();
        assert_eq!(outdirs, vec!["--outdir=dist"]);
        assert!(!args.contains(&"--bundle".to_string()));
        assert_eq!(
            args.iter().filter(|a| a.starts_with("--tsconfig")).count(),
            1
        );
        assert!(args.contains(&"--charset=utf8".to_string()));
    }

    #[test]
    fn test_args_inline_source_map() {
        let request = BundleRequest {
            source_map: SourceMapMode::Inline,
            ..request()
        };

        assert!(EsbuildCli::args(&request).contains(&"--sourcemap=inline".to_string()));
    }

    #[test]
    fn test_locate_walks_up() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join(BINARY_NAME), "").unwrap();
        let nested = dir.path().join("packages/app");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(EsbuildCli::locate(&nested).binary(), bin.join(BINARY_NAME));
    }

    #[test]
    fn test_locate_falls_back_to_path() {
        let dir = TempDir::new().unwrap();

        assert_eq!(
            EsbuildCli::locate(dir.path()).binary(),
            Path::new(BINARY_NAME)
        );
    }

    #[tokio::test]
    async fn test_no_entry_points_skips_run() {
        let cli = EsbuildCli::new("/definitely/not/esbuild");
        let request = BundleRequest {
            entry_points: vec![],
            ..request()
        };

        assert_eq!(cli.bundle(&request).await.unwrap(), BundleOutput::default());
    }

    #[tokio::test]
    async fn test_only_declarations_skips_run() {
        let cli = EsbuildCli::new("/definitely/not/esbuild");
        let request = BundleRequest {
            entry_points: vec![PathBuf::from("types.d.ts")],
            ..request()
        };

        assert!(cli.bundle(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_binary_is_compile_error() {
        let dir = TempDir::new().unwrap();
        let cli = EsbuildCli::new(dir.path().join("no-such-esbuild"));
        let request = BundleRequest {
            working_dir: dir.path().to_path_buf(),
            ..request()
        };

        let err = cli.bundle(&request).await.unwrap_err();
        assert!(err.is_compile());
    }
}
