use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for etsc-config operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Keeps the file content and display name together so parse errors can
/// point into the file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error for a JSON-with-comments document, pointing at
    /// the reported line and column.
    pub fn json_error(&self, source: json5::Error) -> Box<Error> {
        let json5::Error::Message { msg, location } = source;
        let span = location.and_then(|loc| self.span_at(loc.line, loc.column));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: msg,
        })
    }

    /// Span of the character at a 1-based line and column. The end of the
    /// document gives an empty span.
    fn span_at(&self, line: usize, column: usize) -> Option<SourceSpan> {
        let start = self
            .src
            .split_inclusive('\n')
            .take(line.checked_sub(1)?)
            .map(str::len)
            .sum::<usize>();
        let text = self.src.get(start..)?;
        let (offset, ch) = text
            .char_indices()
            .nth(column.checked_sub(1)?)
            .map(|(i, c)| (i, c.len_utf8()))
            .unwrap_or((text.len(), 0));
        Some(SourceSpan::new((start + offset).into(), ch))
    }

    /// Create a parse error from a toml error, pointing at the offending span.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: source.message().to_string(),
        })
    }

    /// Create an error for a document that parsed but has the wrong shape.
    pub fn shape_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Shape {
            src: self.named_source(),
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{name} not found in {} or any parent directory", .searched.display())]
    #[diagnostic(
        code(etsc::config_not_found),
        help("run 'tsc --init' to create one, or set projectDescriptorPath in the etsc config")
    )]
    ConfigNotFound { name: String, searched: PathBuf },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .src.name())]
    #[diagnostic(code(etsc::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid configuration in {}: {message}", .src.name())]
    #[diagnostic(code(etsc::invalid_shape))]
    Shape {
        #[source_code]
        src: NamedSource<String>,
        message: String,
    },

    #[error("cannot resolve extends '{specifier}' from '{}'", .from.display())]
    #[diagnostic(
        code(etsc::extends_not_found),
        help("relative paths must start with './' or '../'; packages are looked up in node_modules")
    )]
    ExtendsNotFound { specifier: String, from: PathBuf },

    #[error("'{}' extends itself", .path.display())]
    #[diagnostic(code(etsc::circular_extends))]
    CircularExtends { path: PathBuf },

    #[error("invalid glob pattern '{pattern}' in {}", .config.display())]
    #[diagnostic(code(etsc::invalid_pattern))]
    Pattern {
        pattern: String,
        config: PathBuf,
        #[source]
        source: globset::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    pub fn config_not_found(name: impl Into<String>, searched: impl Into<PathBuf>) -> Box<Self> {
        Box::new(Error::ConfigNotFound {
            name: name.into(),
            searched: searched.into(),
        })
    }
}
