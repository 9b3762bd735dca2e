//! Core operations.
//!
//! This module contains the business logic for etsc,
//! separated from CLI argument parsing and output rendering.

pub mod build;

pub use build::{BuildOptions, build, prepare};
