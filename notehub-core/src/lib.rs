//! NoteHub Core - Entity Types
//!
//! Data types, tag normalization, draft validation, and the notes API
//! contract. Every other crate in the workspace depends on this one.

pub mod api;
pub mod draft;
pub mod error;
pub mod identity;
pub mod note;
pub mod query;
pub mod tag;

pub use api::NotesApi;
pub use draft::{DraftField, NoteDraft, CONTENT_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
pub use error::{ApiError, CacheError, DraftError, DraftErrors, NoteHubError, NoteHubResult};
pub use identity::{NoteId, Timestamp};
pub use note::{CreateNotePayload, FetchNotesParams, Note, NotesPage};
pub use query::{QueryKey, NOTES_NAMESPACE};
pub use tag::{normalize_tag, NoteTag, TagFilter, TagParseError, ALL_TAGS_PARAM};
