//! Report data structures.
//!
//! Data collection is separate from rendering: the build produces a report,
//! which is then rendered to an Output target.

mod build;
mod output;

pub use build::BuildReport;
pub use output::{Report, TerminalOutput};
