//! Bundler options that etsc always decides itself.

use crate::to_kebab_case;

/// Flags derived from the resolved build; a pass-through option with one of
/// these names would override it. Kebab-case, as on the command line.
pub const RESERVED_BUNDLER_OPTIONS: &[&str] = &[
    "entry-points",
    "outdir",
    "outfile",
    "outbase",
    "bundle",
    "tsconfig",
    "sourcemap",
    "target",
    "format",
    "platform",
    "minify",
];

/// Whether a pass-through option name collides with a resolved flag.
pub fn is_reserved_bundler_option(name: &str) -> bool {
    RESERVED_BUNDLER_OPTIONS.contains(&to_kebab_case(name).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_options() {
        assert!(is_reserved_bundler_option("outdir"));
        assert!(is_reserved_bundler_option("entryPoints"));
        assert!(is_reserved_bundler_option("bundle"));
        assert!(!is_reserved_bundler_option("logLevel"));
        assert!(!is_reserved_bundler_option("keepNames"));
    }
}
