//! Build configuration resolution and orchestration for etsc.
//!
//! [`resolve`] merges a [`ProjectDescriptor`](etsc_config::ProjectDescriptor)
//! and a [`UserConfig`](etsc_config::UserConfig) into a
//! [`ResolvedBuildConfig`], which an [`Orchestrator`] turns into a build.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod defaults;
mod engine;
mod error;
mod hook;
mod orchestrator;
mod resolve;
mod timing;

pub use defaults::Defaults;
pub use engine::{
    AssetCopier, BundleOutput, BundleRequest, Bundler, EsbuildCli, GlobCopier, HookRunner,
    ShellHookRunner, clean_output_dir,
};
pub use error::{BuildError, BuildFailed};
pub use hook::{Hook, HookKind};
pub use orchestrator::{BuildObserver, BuildOutcome, BuildState, BuildSummary, Orchestrator};
pub use resolve::{AssetMatcher, AssetsSpec, ResolvedBuildConfig, resolve, source_map_mode};
pub use timing::{Timed, timed};
