//! Contract for the remote notes backend.
//!
//! The REST implementation lives in notehub-tui; tests use the in-memory
//! fake from notehub-test-utils.

use crate::error::NoteHubResult;
use crate::note::{CreateNotePayload, FetchNotesParams, Note, NotesPage};
use async_trait::async_trait;

/// Notes backend capability consumed by the client.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetch one page of notes. Any non-success response is an error.
    async fn fetch_notes(&self, params: &FetchNotesParams) -> NoteHubResult<NotesPage>;

    /// Create a note and return it as stored by the backend.
    async fn create_note(&self, payload: &CreateNotePayload) -> NoteHubResult<Note>;
}
