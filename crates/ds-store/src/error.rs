use std::fmt;

/// Errors surfaced by the persistence layer.
///
/// Reads never return these to end users (they degrade to defaults); writes do,
/// so the caller can report the failure and retry.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure while reading or writing a key.
    Io { key: String, message: String },
    /// The value could not be serialised.
    Encode { key: String, message: String },
    /// The backing store cannot be used at all (bad key, lock poisoned, offline).
    Unavailable(String),
    /// The value was refused before reaching the store.
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { key, message } => write!(f, "store io error key={key}: {message}"),
            StoreError::Encode { key, message } => {
                write!(f, "store encode error key={key}: {message}")
            }
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
            StoreError::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
