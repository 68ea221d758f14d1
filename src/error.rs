use std::path::PathBuf;

use thiserror::Error;

/// Recoverable failures surfaced by the crate.
///
/// Contract violations (dereferencing an end cursor, stepping past the end,
/// indexing a tag out of range) are panics and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tour configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl Error {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_display() {
        let err = Error::Allocation { bytes: 24 };
        assert_eq!(err.to_string(), "Failed to allocate 24 bytes");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::invalid_config("list.advance_by", "must be smaller than 3");
        let display = err.to_string();
        assert!(display.contains("'list.advance_by'"));
        assert!(display.contains("must be smaller than 3"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Io {
            path: PathBuf::from("tour.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("tour.toml"));
        assert!(err.source().is_some());
    }
}
