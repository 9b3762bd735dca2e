//! Source map mode derivation from compiler flags.

use etsc_config::CompilerOptions;
use etsc_core::SourceMapMode;

/// Map `sourceMap` / `inlineSourceMap` / `inlineSources` onto a bundler mode.
///
/// Combinations the TypeScript compiler rejects produce [`SourceMapMode::Off`].
pub fn source_map_mode(options: &CompilerOptions) -> SourceMapMode {
    let source_map = options.source_map.unwrap_or(false);
    let inline_source_map = options.inline_source_map.unwrap_or(false);
    let inline_sources = options.inline_sources.unwrap_or(false);

    // inlineSources requires either inlineSourceMap or sourceMap
    if inline_sources && !inline_source_map && !source_map {
        return SourceMapMode::Off;
    }

    // mutually exclusive in tsconfig
    if source_map && inline_source_map {
        return SourceMapMode::Off;
    }

    if inline_source_map {
        SourceMapMode::Inline
    } else if source_map {
        SourceMapMode::External
    } else {
        SourceMapMode::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(source_map: bool, inline_source_map: bool, inline_sources: bool) -> CompilerOptions {
        CompilerOptions {
            source_map: Some(source_map),
            inline_source_map: Some(inline_source_map),
            inline_sources: Some(inline_sources),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_flag_combinations() {
        use SourceMapMode::*;

        // (sourceMap, inlineSourceMap, inlineSources) -> mode
        let table = [
            ((false, false, false), Off),
            ((false, false, true), Off),
            ((false, true, false), Inline),
            ((false, true, true), Inline),
            ((true, false, false), External),
            ((true, false, true), External),
            ((true, true, false), Off),
            ((true, true, true), Off),
        ];

        for ((sm, ism, is), expected) in table {
            assert_eq!(
                source_map_mode(&options(sm, ism, is)),
                expected,
                "sourceMap={sm} inlineSourceMap={ism} inlineSources={is}"
            );
        }
    }

    #[test]
    fn test_unset_flags_are_off() {
        assert_eq!(
            source_map_mode(&CompilerOptions::default()),
            SourceMapMode::Off
        );
    }
}
