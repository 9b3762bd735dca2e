//! Build report data structures.

use std::{path::PathBuf, time::Duration};

use etsc_build::{BuildSummary, HookKind, ResolvedBuildConfig};
use etsc_core::{Format, SourceMapMode, is_declaration_file};

use super::output::{Output, Report};

/// Report data from a successful build.
#[derive(Debug)]
pub struct BuildReport {
    /// Where compiled files were written.
    pub output_dir: PathBuf,
    pub project_root: PathBuf,
    /// Number of files the bundler emits code for.
    pub entry_count: usize,
    pub format: Format,
    pub target: String,
    pub source_map: SourceMapMode,
    /// Whether an existing output directory was removed first.
    pub cleaned: bool,
    /// Bundler warnings.
    pub warnings: Vec<String>,
    /// Copied asset destinations.
    pub copied: Vec<PathBuf>,
    /// Hooks that ran, in order.
    pub hooks: Vec<HookKind>,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn new(config: &ResolvedBuildConfig, summary: BuildSummary, elapsed: Duration) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            project_root: config.project_root.clone(),
            entry_count: config
                .entry_points
                .iter()
                .filter(|entry| !is_declaration_file(entry))
                .count(),
            format: config.format,
            target: config.target.clone(),
            source_map: config.source_map,
            cleaned: summary.cleaned,
            warnings: summary.warnings,
            copied: summary.copied,
            hooks: summary.hooks,
            elapsed,
        }
    }

    fn display_path(&self, path: &std::path::Path) -> String {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        let output_dir = self.display_path(&self.output_dir);
        if self.cleaned {
            out.key_value("Cleaned", &output_dir);
        }
        if !self.hooks.is_empty() {
            let hooks: Vec<_> = self.hooks.iter().map(HookKind::as_str).collect();
            out.key_value("Hooks", &hooks.join(", "));
        }
        out.key_value(
            "Compiled",
            &format!(
                "{} file{} ({}, {}, source maps {})",
                self.entry_count,
                if self.entry_count == 1 { "" } else { "s" },
                self.format,
                self.target,
                self.source_map
            ),
        );

        if !self.copied.is_empty() {
            out.section(&format!("Copied assets ({})", self.copied.len()));
            for file in &self.copied {
                out.added_item(&self.display_path(file));
            }
        }

        out.key_value("Output", &output_dir);
        out.newline();
        out.preformatted(&format!("Built in {}", format_duration(self.elapsed)));
    }
}

fn format_duration(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}
