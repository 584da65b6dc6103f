//! Note entities and API payloads.

use crate::identity::{NoteId, Timestamp};
use crate::tag::NoteTag;
use serde::{Deserialize, Serialize};

/// A note as returned by the notes backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// One fetched page of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

impl NotesPage {
    pub fn new(notes: Vec<Note>, total_pages: u32) -> Self {
        Self { notes, total_pages }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Pagination controls are only meaningful with more than one page.
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

/// Body of a create-note request. Only produced by draft validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNotePayload {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

/// Query string for a notes listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchNotesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<NoteTag>,
}
