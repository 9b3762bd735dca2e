use std::path::PathBuf;

use crate::{BuildError, BuildFailed, HookKind};

/// What a successful build did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Whether an existing output directory was removed first.
    pub cleaned: bool,
    pub warnings: Vec<String>,
    pub copied: Vec<PathBuf>,
    pub hooks: Vec<HookKind>,
}

/// The result of [`Orchestrator::run`](super::Orchestrator::run).
#[derive(Debug)]
pub enum BuildOutcome {
    Done(BuildSummary),
    /// Every error raised before the build stopped, in step order.
    Failed(Vec<BuildError>),
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Done(_))
    }

    pub fn errors(&self) -> &[BuildError] {
        match self {
            BuildOutcome::Done(_) => &[],
            BuildOutcome::Failed(errors) => errors,
        }
    }

    pub fn into_result(self) -> Result<BuildSummary, BuildFailed> {
        match self {
            BuildOutcome::Done(summary) => Ok(summary),
            BuildOutcome::Failed(errors) => Err(BuildFailed { errors }),
        }
    }
}
