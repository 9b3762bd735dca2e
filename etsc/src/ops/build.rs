//! Build operation - load configuration, resolve it, and run the build.

use std::path::{Path, PathBuf};

use etsc_build::{
    BuildObserver, BuildOutcome, BuildState, Defaults, Orchestrator, ResolvedBuildConfig, Timed,
    resolve, timed,
};
use etsc_config::{ProjectDescriptor, UserConfig};
use tracing::{debug, info};

/// Options from the command line.
pub struct BuildOptions<'a> {
    /// User config path, relative to the working directory.
    pub user_config: &'a Path,
    /// Force a clean build.
    pub clean: bool,
    /// Explicit esbuild executable.
    pub esbuild: Option<&'a Path>,
}

/// Load both configuration files and resolve the build parameters.
///
/// A broken user config is ignored; a missing or broken project descriptor
/// is an error.
pub fn prepare(cwd: &Path, opts: BuildOptions) -> etsc_config::Result<ResolvedBuildConfig> {
    let user = UserConfig::load(&cwd.join(opts.user_config));
    let descriptor = ProjectDescriptor::load(cwd, user.project_descriptor_path.as_deref())?;

    let mut config = resolve(&descriptor, &user, &Defaults::default());
    config.clean |= opts.clean;
    if let Some(esbuild) = opts.esbuild {
        config.bundler_binary = Some(executable(cwd, esbuild));
    }
    debug!(?config, "resolved build config");

    Ok(config)
}

/// Run the build, measuring how long it takes.
pub async fn build(config: &ResolvedBuildConfig) -> Timed<BuildOutcome> {
    let orchestrator = Orchestrator::for_config(config).observer(StepLogger);
    timed(orchestrator.run(config)).await
}

// bare names are looked up on PATH
fn executable(cwd: &Path, path: &Path) -> PathBuf {
    if path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}

struct StepLogger;

impl BuildObserver for StepLogger {
    fn on_transition(&self, _from: BuildState, to: BuildState) {
        info!(step = %to, "build step");
    }

    fn on_assets_copied(&self, files: &[PathBuf]) {
        debug!(count = files.len(), "assets copied");
    }
}
