//! Identity types for NoteHub entities

use chrono::{DateTime, Utc};

/// Note identifier as issued by the notes backend.
///
/// The backend owns id generation; the client treats ids as opaque strings.
pub type NoteId = String;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
