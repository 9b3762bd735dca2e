//! Core types shared across the etsc build driver.
//!
//! This crate provides the small vocabulary every other etsc crate speaks:
//! bundler output settings and the set of recognized source extensions.

mod extensions;
mod options;
mod types;
mod utils;

pub use extensions::{
    DECLARATION_EXTENSION, SCRIPT_EXTENSIONS, SOURCE_EXTENSIONS, TYPESCRIPT_EXTENSIONS,
    is_declaration_file, source_negation_pattern,
};
pub use options::{RESERVED_BUNDLER_OPTIONS, is_reserved_bundler_option};
pub use types::{Format, Platform, SourceMapMode};
pub use utils::to_kebab_case;
