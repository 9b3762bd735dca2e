//! Recognized source file extensions.

use std::path::Path;

/// Extensions the bundler compiles. Asset copying never touches these.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "js", "tsx", "jsx"];

/// Extensions a TypeScript project always includes.
pub const TYPESCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Extensions included only when `allowJs` is set.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx"];

/// Suffix of declaration files.
pub const DECLARATION_EXTENSION: &str = ".d.ts";

/// Glob negating every source extension, e.g. `!**/*.{ts,js,tsx,jsx}`.
pub fn source_negation_pattern() -> String {
    format!("!**/*.{{{}}}", SOURCE_EXTENSIONS.join(","))
}

/// Whether the path names a `.d.ts` declaration file.
pub fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(DECLARATION_EXTENSION))
}
