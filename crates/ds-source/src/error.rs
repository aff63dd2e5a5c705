use std::fmt;

/// Recoverable fetch failures.
///
/// Every variant means "this screen could not load"; none is fatal. Callers
/// log it and offer a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Network unreachable, DNS, TLS, connection reset.
    Transport(String),
    /// The server answered with a non-success status.
    Status { code: u16, url: String },
    /// The body was not the expected JSON shape.
    Decode(String),
    /// The document parsed but carried no usable entries.
    Empty(String),
}

impl SourceError {
    /// Suggestion shown next to the error.
    pub fn hint(&self) -> &'static str {
        match self {
            SourceError::Transport(_) => "Check your internet connection.",
            SourceError::Status { .. } | SourceError::Decode(_) | SourceError::Empty(_) => {
                "Try changing the language to Arabic (some books are only in Arabic)."
            }
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "transport error: {msg}"),
            SourceError::Status { code, url } => write!(f, "http status {code} for {url}"),
            SourceError::Decode(msg) => write!(f, "decode error: {msg}"),
            SourceError::Empty(what) => write!(f, "empty response: {what}"),
        }
    }
}

impl std::error::Error for SourceError {}
