//! User-defined commands run around the build.

use std::fmt;

/// When a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Before compiling and copying assets.
    Prebuild,
    /// After both compile and asset copy succeeded.
    Postbuild,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::Prebuild => "prebuild",
            HookKind::Postbuild => "postbuild",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A shell command line run from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub kind: HookKind,
    pub command: String,
}

impl Hook {
    /// Create a hook, or `None` for a blank command.
    pub fn new(kind: HookKind, command: impl Into<String>) -> Option<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            None
        } else {
            Some(Self { kind, command })
        }
    }
}
