use std::fmt;

/// Where a build is in its lifecycle.
///
/// Builds move forward through the states in declaration order, skipping
/// steps that are not configured. Any non-terminal state may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildState {
    Idle,
    Cleaning,
    PreHook,
    Building,
    PostHook,
    Done,
    Failed,
}

impl BuildState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildState::Idle => "idle",
            BuildState::Cleaning => "cleaning",
            BuildState::PreHook => "prebuild",
            BuildState::Building => "building",
            BuildState::PostHook => "postbuild",
            BuildState::Done => "done",
            BuildState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildState::Done | BuildState::Failed)
    }

    pub fn can_transition_to(&self, next: BuildState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            BuildState::Failed => *self != BuildState::Idle,
            BuildState::Done => *self >= BuildState::Building,
            next => next > *self,
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
