//! Build observer trait for progress reporting.

use std::path::PathBuf;

use super::BuildState;
use crate::BundleOutput;

/// Receives callbacks as a build progresses.
///
/// Every method has an empty default, so observers only implement what they
/// care about.
///
/// # Example
///
/// ```ignore
/// struct Progress;
///
/// impl BuildObserver for Progress {
///     fn on_transition(&self, _from: BuildState, to: BuildState) {
///         eprintln!("-> {to}");
///     }
/// }
/// ```
pub trait BuildObserver: Send + Sync {
    /// Called on every state change, including the final one.
    #[allow(unused_variables)]
    fn on_transition(&self, from: BuildState, to: BuildState) {}

    /// Called when the bundler finished successfully.
    #[allow(unused_variables)]
    fn on_compiled(&self, output: &BundleOutput) {}

    /// Called when the asset copier finished successfully.
    #[allow(unused_variables)]
    fn on_assets_copied(&self, files: &[PathBuf]) {}
}
