use std::fmt;
use std::path::PathBuf;

/// Where a populated field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// The provider returned a raw value under the field's own key.
    Provider { key: String },
    /// The provider returned a path under the `_FILE` key and the value was
    /// read from that file.
    File { key: String, path: PathBuf },
    /// Nothing was provided; the declared default was used as-is.
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Provider { key } => write!(f, "{key}"),
            ValueSource::File { key, path } => write!(f, "{key} ({})", path.display()),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// Output format for generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DocsFormat {
    Plaintext,
    #[default]
    Markdown,
}

impl fmt::Display for DocsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocsFormat::Plaintext => write!(f, "plaintext"),
            DocsFormat::Markdown => write!(f, "markdown"),
        }
    }
}
