//! Build orchestration.
//!
//! A build runs these steps, skipping the ones that are not configured:
//!
//! 1. remove the output directory,
//! 2. run the prebuild hook,
//! 3. compile sources and copy assets concurrently,
//! 4. run the postbuild hook.
//!
//! A failing step stops the build. Compile and copy always both settle, and
//! their errors are reported together.

mod observer;
mod outcome;
mod state;

use tracing::debug;

pub use observer::BuildObserver;
pub use outcome::{BuildOutcome, BuildSummary};
pub use state::BuildState;
use crate::{
    AssetCopier, BuildError, BundleRequest, Bundler, EsbuildCli, GlobCopier, HookRunner,
    ResolvedBuildConfig, ShellHookRunner, clean_output_dir,
};

/// Runs builds with a set of engines.
///
/// # Example
///
/// ```ignore
/// let outcome = Orchestrator::for_config(&config)
///     .observer(Progress)
///     .run(&config)
///     .await;
/// ```
pub struct Orchestrator {
    bundler: Box<dyn Bundler>,
    copier: Box<dyn AssetCopier>,
    hooks: Box<dyn HookRunner>,
    observers: Vec<Box<dyn BuildObserver>>,
}

impl Orchestrator {
    /// Create an orchestrator with the given bundler and the default asset
    /// copier and hook runner.
    pub fn new(bundler: impl Bundler + 'static) -> Self {
        Self {
            bundler: Box::new(bundler),
            copier: Box::new(GlobCopier),
            hooks: Box::new(ShellHookRunner),
            observers: Vec::new(),
        }
    }

    /// Create an orchestrator driving esbuild, either the configured binary
    /// or the one found for the project.
    pub fn for_config(config: &ResolvedBuildConfig) -> Self {
        let bundler = match &config.bundler_binary {
            Some(binary) => EsbuildCli::new(binary),
            None => EsbuildCli::locate(&config.project_root),
        };
        Self::new(bundler)
    }

    pub fn copier(mut self, copier: impl AssetCopier + 'static) -> Self {
        self.copier = Box::new(copier);
        self
    }

    pub fn hooks(mut self, hooks: impl HookRunner + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Add an observer to receive build progress.
    pub fn observer(mut self, observer: impl BuildObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Run a build.
    pub async fn run(&self, config: &ResolvedBuildConfig) -> BuildOutcome {
        let mut tracker = Tracker {
            state: BuildState::Idle,
            observers: &self.observers,
        };
        let mut summary = BuildSummary::default();

        if config.clean {
            tracker.advance(BuildState::Cleaning);
            match clean(config) {
                Ok(removed) => summary.cleaned = removed,
                Err(err) => return tracker.fail(vec![err]),
            }
        }

        if let Some(hook) = &config.prebuild {
            tracker.advance(BuildState::PreHook);
            if let Err(err) = self.hooks.run(hook, &config.project_root).await {
                return tracker.fail(vec![err]);
            }
            summary.hooks.push(hook.kind);
        }

        tracker.advance(BuildState::Building);
        let request = BundleRequest::from_config(config);
        let (compiled, copied) = tokio::join!(
            self.bundler.bundle(&request),
            self.copier.copy(&config.assets)
        );

        let mut errors = Vec::new();
        match compiled {
            Ok(output) => {
                debug!(warnings = output.warnings.len(), "compiled");
                self.observers.iter().for_each(|o| o.on_compiled(&output));
                summary.warnings = output.warnings;
            }
            Err(err) => errors.push(err),
        }
        match copied {
            Ok(files) => {
                self.observers.iter().for_each(|o| o.on_assets_copied(&files));
                summary.copied = files;
            }
            Err(err) => errors.push(err),
        }
        if !errors.is_empty() {
            return tracker.fail(errors);
        }

        if let Some(hook) = &config.postbuild {
            tracker.advance(BuildState::PostHook);
            if let Err(err) = self.hooks.run(hook, &config.project_root).await {
                return tracker.fail(vec![err]);
            }
            summary.hooks.push(hook.kind);
        }

        tracker.advance(BuildState::Done);
        BuildOutcome::Done(summary)
    }
}

fn clean(config: &ResolvedBuildConfig) -> Result<bool, BuildError> {
    if config.project_root.starts_with(&config.output_dir) {
        return Err(BuildError::CleanRefused {
            path: config.output_dir.clone(),
        });
    }
    clean_output_dir(&config.output_dir)
}

struct Tracker<'a> {
    state: BuildState,
    observers: &'a [Box<dyn BuildObserver>],
}

impl Tracker<'_> {
    fn advance(&mut self, next: BuildState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid build transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "build state");
        for observer in self.observers {
            observer.on_transition(self.state, next);
        }
        self.state = next;
    }

    fn fail(&mut self, errors: Vec<BuildError>) -> BuildOutcome {
        self.advance(BuildState::Failed);
        BuildOutcome::Failed(errors)
    }
}
