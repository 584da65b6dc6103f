//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use notehub_core::{Note, NoteHubResult, NotesPage};

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// The debounced search deadline passed.
    SearchDeadline,
    NotesFetched {
        request_id: u64,
        result: NoteHubResult<NotesPage>,
    },
    NoteCreated {
        submission_id: u64,
        result: NoteHubResult<Note>,
    },
}
