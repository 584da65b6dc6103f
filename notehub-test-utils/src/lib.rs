//! NoteHub Test Utilities
//!
//! Centralized test infrastructure for the NoteHub workspace:
//! - An in-memory notes backend implementing [`NotesApi`]
//! - Proptest generators for core types
//! - Fixtures for common scenarios
//! - Assertions on NoteHub results

pub use notehub_core::{
    ApiError, CreateNotePayload, FetchNotesParams, Note, NoteHubError, NoteHubResult, NoteTag,
    NotesApi, NotesPage, QueryKey, Timestamp,
};

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

// ============================================================================
// FAKE BACKEND
// ============================================================================

#[derive(Debug, Default)]
struct FakeState {
    notes: Vec<Note>,
    next_id: u64,
    fetch_calls: Vec<FetchNotesParams>,
    create_calls: Vec<CreateNotePayload>,
    failing_fetches: u32,
    failing_creates: u32,
}

/// In-memory notes backend.
///
/// Search matches title or content case-insensitively, tags filter exactly,
/// and pages are 1-based slices of `per_page` notes in insertion order.
/// Failures can be injected for the next N calls of either operation.
#[derive(Debug, Default)]
pub struct FakeNotesApi {
    state: Mutex<FakeState>,
}

impl FakeNotesApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `notes`.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let next_id = notes.len() as u64;
        Self {
            state: Mutex::new(FakeState {
                notes,
                next_id,
                ..FakeState::default()
            }),
        }
    }

    /// Make the next `count` fetches fail with a 500.
    pub fn fail_next_fetches(&self, count: u32) {
        self.lock().failing_fetches = count;
    }

    /// Make the next `count` creates fail with a 500.
    pub fn fail_next_creates(&self, count: u32) {
        self.lock().failing_creates = count;
    }

    /// Every fetch received, in order.
    pub fn fetch_calls(&self) -> Vec<FetchNotesParams> {
        self.lock().fetch_calls.clone()
    }

    /// Every create payload received, in order, including failed ones.
    pub fn create_calls(&self) -> Vec<CreateNotePayload> {
        self.lock().create_calls.clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        // A panicking test already failed; keep serving the remaining state.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn server_error(endpoint: &str) -> NoteHubError {
    ApiError::RequestFailed {
        endpoint: endpoint.to_string(),
        status: 500,
        message: "injected failure".to_string(),
    }
    .into()
}

fn matches(note: &Note, params: &FetchNotesParams) -> bool {
    let tag_ok = params.tag.map_or(true, |tag| note.tag == tag);
    let search_ok = params.search.as_deref().map_or(true, |search| {
        let needle = search.to_lowercase();
        note.title.to_lowercase().contains(&needle) || note.content.to_lowercase().contains(&needle)
    });
    tag_ok && search_ok
}

#[async_trait]
impl NotesApi for FakeNotesApi {
    async fn fetch_notes(&self, params: &FetchNotesParams) -> NoteHubResult<NotesPage> {
        let mut state = self.lock();
        state.fetch_calls.push(params.clone());
        if state.failing_fetches > 0 {
            state.failing_fetches -= 1;
            return Err(server_error("/notes"));
        }

        let per_page = params.per_page.max(1) as usize;
        let matching: Vec<&Note> = state.notes.iter().filter(|n| matches(n, params)).collect();
        let total_pages = matching.len().div_ceil(per_page) as u32;
        let start = (params.page.max(1) as usize - 1) * per_page;
        let notes = matching
            .into_iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();
        Ok(NotesPage::new(notes, total_pages))
    }

    async fn create_note(&self, payload: &CreateNotePayload) -> NoteHubResult<Note> {
        let mut state = self.lock();
        state.create_calls.push(payload.clone());
        if state.failing_creates > 0 {
            state.failing_creates -= 1;
            return Err(server_error("/notes"));
        }

        state.next_id += 1;
        let now = Utc::now();
        let note = Note {
            id: format!("note-{}", state.next_id),
            title: payload.title.clone(),
            content: payload.content.clone(),
            tag: payload.tag,
            created_at: now,
            updated_at: Some(now),
        };
        state.notes.push(note.clone());
        Ok(note)
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating NoteHub types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a Timestamp (DateTime<Utc>).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        // 2020-2030
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    pub fn arb_note_tag() -> impl Strategy<Value = NoteTag> {
        prop::sample::select(NoteTag::ALL.to_vec())
    }

    pub fn arb_tag_filter() -> impl Strategy<Value = Option<NoteTag>> {
        prop::option::of(arb_note_tag())
    }

    /// Generate a Note whose fields satisfy the creation rules.
    pub fn arb_note() -> impl Strategy<Value = Note> {
        (
            "[a-f0-9]{24}",
            "[a-zA-Z0-9 ]{3,50}",
            "[a-zA-Z0-9 .,]{0,500}",
            arb_note_tag(),
            arb_timestamp(),
        )
            .prop_map(|(id, title, content, tag, created_at)| Note {
                id,
                title,
                content,
                tag,
                created_at,
                updated_at: Some(created_at),
            })
    }

    pub fn arb_query_key() -> impl Strategy<Value = QueryKey> {
        ("[a-z ]{0,20}", 1u32..50, arb_tag_filter())
            .prop_map(|(search, page, tag)| QueryKey::new(search, page, tag))
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common testing scenarios.

    use super::*;

    /// A note with a deterministic id and the given title and tag.
    pub fn note(id: &str, title: &str, tag: NoteTag) -> Note {
        let created_at = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_else(Utc::now);
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("Content of {}", title),
            tag,
            created_at,
            updated_at: None,
        }
    }

    /// `count` notes cycling through every tag, titled "Note 1", "Note 2", ...
    pub fn notes(count: usize) -> Vec<Note> {
        (1..=count)
            .map(|i| {
                let tag = NoteTag::ALL[(i - 1) % NoteTag::ALL.len()];
                note(&format!("note-{}", i), &format!("Note {}", i), tag)
            })
            .collect()
    }

    /// A page holding `notes` out of `total_pages`.
    pub fn page(notes: Vec<Note>, total_pages: u32) -> NotesPage {
        NotesPage::new(notes, total_pages)
    }

    pub fn empty_page() -> NotesPage {
        NotesPage::new(Vec::new(), 0)
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for NoteHub results.

    use super::*;

    /// Assert that a NoteHubResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &NoteHubResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a NoteHubResult is an API error.
    #[track_caller]
    pub fn assert_api_error<T: std::fmt::Debug>(result: &NoteHubResult<T>) {
        match result {
            Err(NoteHubError::Api(_)) => {}
            other => panic!("Expected Api error, got: {:?}", other),
        }
    }

    /// Assert that a page lists exactly the given note ids, in order.
    #[track_caller]
    pub fn assert_page_ids(page: &NotesPage, ids: &[&str]) {
        let actual: Vec<&str> = page.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(actual, ids, "Unexpected notes on page");
    }
}
