//! Error types for NoteHub operations

use crate::draft::DraftField;
use crate::tag::TagParseError;
use thiserror::Error;

/// Remote notes API errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request to {endpoint} failed with status {status}: {message}")]
    RequestFailed {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Request to {endpoint} could not be sent: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

/// A single failed draft rule.
///
/// The display string is the message shown next to the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Required field")]
    TitleRequired,

    #[error("Title must be at least 3 characters")]
    TitleTooShort,

    #[error("Too Long!")]
    TitleTooLong,

    #[error("Too Long!")]
    ContentTooLong,

    #[error("Tag is required")]
    TagRequired,

    #[error("Tag must be one of: Todo, Work, Personal, Meeting, Shopping")]
    TagUnknown { value: String },
}

impl DraftError {
    pub fn field(&self) -> DraftField {
        match self {
            DraftError::TitleRequired | DraftError::TitleTooShort | DraftError::TitleTooLong => {
                DraftField::Title
            }
            DraftError::ContentTooLong => DraftField::Content,
            DraftError::TagRequired | DraftError::TagUnknown { .. } => DraftField::Tag,
        }
    }
}

/// Every rule a draft failed, at most one per field.
#[derive(Debug, Clone, Error, PartialEq, Eq, Default)]
#[error("Draft has {} invalid field(s)", .0.len())]
pub struct DraftErrors(pub Vec<DraftError>);

impl DraftErrors {
    pub fn for_field(&self, field: DraftField) -> Option<&DraftError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftError> {
        self.0.iter()
    }
}

/// Query cache errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache lock poisoned")]
    LockPoisoned,
}

/// Master error type for all NoteHub errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteHubError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] DraftErrors),

    #[error("Tag error: {0}")]
    Tag(#[from] TagParseError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Result type alias for NoteHub operations.
pub type NoteHubResult<T> = Result<T, NoteHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_error_messages() {
        assert_eq!(DraftError::TitleRequired.to_string(), "Required field");
        assert_eq!(
            DraftError::TitleTooShort.to_string(),
            "Title must be at least 3 characters"
        );
        assert_eq!(DraftError::TitleTooLong.to_string(), "Too Long!");
        assert_eq!(DraftError::ContentTooLong.to_string(), "Too Long!");
        assert_eq!(DraftError::TagRequired.to_string(), "Tag is required");
    }

    #[test]
    fn test_draft_error_fields() {
        assert_eq!(DraftError::TitleTooLong.field(), DraftField::Title);
        assert_eq!(DraftError::ContentTooLong.field(), DraftField::Content);
        assert_eq!(
            DraftError::TagUnknown {
                value: "x".to_string()
            }
            .field(),
            DraftField::Tag
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::RequestFailed {
            endpoint: "/notes".to_string(),
            status: 500,
            message: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/notes"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_master_error_from() {
        let err: NoteHubError = CacheError::LockPoisoned.into();
        assert!(matches!(err, NoteHubError::Cache(CacheError::LockPoisoned)));
        let err: NoteHubError = DraftErrors(vec![DraftError::TitleRequired]).into();
        assert_eq!(err.to_string(), "Validation error: Draft has 1 invalid field(s)");
    }
}
