//! Error types for the itinerary engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::SuggestionRejection;

/// Every way an itinerary operation can fail.
///
/// The first group comes from the in-memory engine and leaves the store
/// untouched. The rest come from storage and the runtime around it.
#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Itinerary item '{id}' not found")]
    NotFound { id: String },
    /// A mutation would break the store's ordering or timing rules
    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },
    /// One or more optimizer suggestions were rejected and nothing was applied
    #[error("{} suggestion(s) rejected", rejections.len())]
    Validation { rejections: Vec<SuggestionRejection> },
    /// A validated plan failed while being committed
    #[error("Internal error: {message}")]
    Internal { message: String },
    #[error("Optimization unavailable: {message}")]
    OptimizationUnavailable { message: String },
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Trip '{id}' not found")]
    TripNotFound { id: String },
    /// A catalog place or accommodation that does not exist
    #[error("{kind} '{id}' not found")]
    ResourceNotFound { kind: &'static str, id: String },
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Names the offending field of an [`ItineraryError::InvalidInput`] before
/// the reason is known.
#[must_use]
pub struct InvalidField(String);

impl InvalidField {
    pub fn with_reason(self, reason: impl Into<String>) -> ItineraryError {
        ItineraryError::InvalidInput {
            field: self.0,
            reason: reason.into(),
        }
    }
}

impl ItineraryError {
    /// Starts an input validation error for `field`.
    pub fn invalid_input(field: impl Into<String>) -> InvalidField {
        InvalidField(field.into())
    }

    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn resource_not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether the UI can recover by reverting to the last committed state.
    ///
    /// Store-level rejections are recoverable. Storage, internal and
    /// configuration failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::ResourceNotFound { .. }
                | Self::InvariantViolation { .. }
                | Self::Validation { .. }
                | Self::InvalidInput { .. }
                | Self::OptimizationUnavailable { .. }
        )
    }
}

/// Attaches a message to rusqlite failures.
pub trait DatabaseResultExt<T> {
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|source| ItineraryError::Database {
            message: message.to_string(),
            source,
        })
    }
}

pub type Result<T> = std::result::Result<T, ItineraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_message() {
        let err = ItineraryError::invariant("day number must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invariant violation: day number must be at least 1"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_internal_is_not_recoverable() {
        let err = ItineraryError::Internal {
            message: "commit aborted".to_string(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_resource_not_found_names_the_kind() {
        let err = ItineraryError::resource_not_found("Place", "museum");
        assert_eq!(err.to_string(), "Place 'museum' not found");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = ItineraryError::invalid_input("open").with_reason("expected HH:MM");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'open': expected HH:MM"
        );
    }
}
