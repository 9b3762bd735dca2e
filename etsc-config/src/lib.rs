//! Configuration loading for the etsc build driver.
//!
//! Two inputs feed a build:
//!
//! - the TypeScript project descriptor ([`ProjectDescriptor`]), which is
//!   required and whose errors are fatal;
//! - the user configuration ([`UserConfig`]), which is optional and falls
//!   back to an empty configuration on any problem.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod descriptor;
mod error;
mod path;
mod user;

pub use descriptor::{
    CompilerOptions, DEFAULT_DESCRIPTOR_NAME, ProjectDescriptor, find_config_file,
};
pub use error::{Error, Result, SourceContext};
pub use path::normalize as normalize_path;
pub use user::{
    AssetsConfig, BundlerOptions, DEFAULT_USER_CONFIG_NAME, FileFormat, LegacyConfig, UserConfig,
    UserConfigFile,
};
