//! Bundler output settings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// How debug-mapping output is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    /// No source maps.
    #[default]
    Off,
    /// Source map embedded in the compiled output.
    Inline,
    /// Source map written next to the compiled output.
    External,
}

impl SourceMapMode {
    /// Returns the mode identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMapMode::Off => "off",
            SourceMapMode::Inline => "inline",
            SourceMapMode::External => "external",
        }
    }

    /// Whether any map is produced.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SourceMapMode::Off)
    }
}

impl fmt::Display for SourceMapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceMapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "false" | "none" => Ok(SourceMapMode::Off),
            "inline" => Ok(SourceMapMode::Inline),
            "external" | "linked" | "true" => Ok(SourceMapMode::External),
            _ => Err(format!(
                "unknown sourcemap mode '{}', expected 'inline', 'external' or a boolean",
                s
            )),
        }
    }
}

impl From<bool> for SourceMapMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            SourceMapMode::External
        } else {
            SourceMapMode::Off
        }
    }
}

// Config files write `sourcemap = true` as often as `sourcemap = "inline"`.
impl<'de> Deserialize<'de> for SourceMapMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(enabled) => Ok(enabled.into()),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Module format of the compiled output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// CommonJS
    #[default]
    Cjs,
    /// ECMAScript modules
    Esm,
    /// Immediately-invoked function expression
    Iife,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Cjs => "cjs",
            Format::Esm => "esm",
            Format::Iife => "iife",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cjs" | "commonjs" => Ok(Format::Cjs),
            "esm" | "module" => Ok(Format::Esm),
            "iife" => Ok(Format::Iife),
            _ => Err(format!(
                "unknown format '{}', expected 'cjs', 'esm' or 'iife'",
                s
            )),
        }
    }
}

// Accepts the `commonjs` and `module` spellings as well.
impl<'de> Deserialize<'de> for Format {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Platform the compiled output runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Node,
    Browser,
    Neutral,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Node => "node",
            Platform::Browser => "browser",
            Platform::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sourcemap_from_str() {
        assert_eq!(
            SourceMapMode::from_str("inline").unwrap(),
            SourceMapMode::Inline
        );
        assert_eq!(
            SourceMapMode::from_str("External").unwrap(),
            SourceMapMode::External
        );
        assert_eq!(
            SourceMapMode::from_str("linked").unwrap(),
            SourceMapMode::External
        );
        assert_eq!(SourceMapMode::from_str("off").unwrap(), SourceMapMode::Off);
        assert!(SourceMapMode::from_str("both").is_err());
    }

    #[test]
    fn test_sourcemap_deserialize_bool_or_name() {
        let on: SourceMapMode = serde_json::from_str("true").unwrap();
        assert_eq!(on, SourceMapMode::External);

        let off: SourceMapMode = serde_json::from_str("false").unwrap();
        assert_eq!(off, SourceMapMode::Off);

        let inline: SourceMapMode = serde_json::from_str(r#""inline""#).unwrap();
        assert_eq!(inline, SourceMapMode::Inline);

        assert!(serde_json::from_str::<SourceMapMode>(r#""sideways""#).is_err());
    }

    #[test]
    fn test_format_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: Format,
        }

        let w: Wrapper = toml::from_str(r#"format = "esm""#).unwrap();
        assert_eq!(w.format, Format::Esm);
        assert_eq!(Format::default(), Format::Cjs);

        let w: Wrapper = toml::from_str(r#"format = "commonjs""#).unwrap();
        assert_eq!(w.format, Format::Cjs);
        let w: Wrapper = toml::from_str(r#"format = "Module""#).unwrap();
        assert_eq!(w.format, Format::Esm);

        assert!(toml::from_str::<Wrapper>(r#"format = "amd""#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceMapMode::Inline.to_string(), "inline");
        assert_eq!(Format::Iife.to_string(), "iife");
        assert_eq!(Platform::Node.to_string(), "node");
    }
}
