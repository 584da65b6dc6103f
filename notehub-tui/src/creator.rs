//! Note creation form.
//!
//! Holds the draft, per-field validation messages, and the submission phase.
//! The request itself is run by the event loop; its outcome comes back via
//! [`NoteCreator::complete`].

use notehub_cache::{CacheResult, QueryCache};
use notehub_core::{
    CreateNotePayload, DraftError, DraftErrors, DraftField, Note, NoteDraft, NoteHubResult,
    NoteTag, NotesPage, QueryKey, NOTES_NAMESPACE,
};

pub const SUBMIT_LABEL: &str = "Create note";
pub const SUBMITTING_LABEL: &str = "Creating...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CreatorPhase {
    #[default]
    Idle,
    Submitting,
    /// The last request failed; the draft is kept for another attempt.
    Failed(String),
}

/// What the host should do with the modal after a request completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorOutcome {
    Close,
    StayOpen,
}

/// A create request tagged with the submission that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub submission_id: u64,
    pub payload: CreateNotePayload,
}

/// Mark every cached notes listing stale.
pub fn invalidate_notes(cache: &QueryCache<QueryKey, NotesPage>) -> CacheResult<u64> {
    cache.invalidate_namespace(NOTES_NAMESPACE)
}

pub struct NoteCreator {
    cache: QueryCache<QueryKey, NotesPage>,
    draft: NoteDraft,
    focus: DraftField,
    errors: DraftErrors,
    submit_attempted: bool,
    phase: CreatorPhase,
    pending: Option<u64>,
}

impl NoteCreator {
    pub fn new(cache: QueryCache<QueryKey, NotesPage>) -> Self {
        Self {
            cache,
            draft: NoteDraft::default(),
            focus: DraftField::Title,
            errors: DraftErrors::default(),
            submit_attempted: false,
            phase: CreatorPhase::Idle,
            pending: None,
        }
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn phase(&self) -> &CreatorPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == CreatorPhase::Submitting
    }

    /// Submission this form is waiting on.
    pub fn pending_submission(&self) -> Option<u64> {
        self.pending
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn error_for(&self, field: DraftField) -> Option<&DraftError> {
        self.errors.for_field(field)
    }

    /// Message of the last failed create request.
    pub fn request_error(&self) -> Option<&str> {
        match &self.phase {
            CreatorPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Replace a field's text. Ignored while a request is in flight.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        *self.draft.value_mut(field) = value.into();
        self.revalidate();
    }

    /// Type into the focused field. The tag field is a selector and takes no text.
    pub fn insert_char(&mut self, c: char) {
        if self.is_submitting() || self.focus == DraftField::Tag {
            return;
        }
        self.draft.value_mut(self.focus).push(c);
        self.revalidate();
    }

    pub fn insert_newline(&mut self) {
        if self.focus == DraftField::Content {
            self.insert_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.is_submitting() || self.focus == DraftField::Tag {
            return;
        }
        if self.draft.value_mut(self.focus).pop().is_some() {
            self.revalidate();
        }
    }

    /// Step the tag selector. An unrecognized value restarts from the default.
    pub fn cycle_tag(&mut self, forward: bool) {
        if self.is_submitting() {
            return;
        }
        let next = match self.draft.value(DraftField::Tag).parse::<NoteTag>() {
            Ok(tag) if forward => tag.next(),
            Ok(tag) => tag.previous(),
            Err(_) => NoteTag::default(),
        };
        *self.draft.value_mut(DraftField::Tag) = next.as_str().to_string();
        self.revalidate();
    }

    /// Once a submit has been attempted, messages track every edit.
    fn revalidate(&mut self) {
        if self.submit_attempted {
            self.errors = match self.draft.validate() {
                Ok(_) => DraftErrors::default(),
                Err(errors) => errors,
            };
        }
    }

    /// Validate and, when valid, enter `Submitting` and hand back the request
    /// tagged with `submission_id`.
    ///
    /// Returns `None` while a request is already in flight or when any field
    /// is invalid; the messages are then available through [`Self::error_for`].
    pub fn submit(&mut self, submission_id: u64) -> Option<CreateRequest> {
        if self.is_submitting() {
            return None;
        }
        self.submit_attempted = true;
        match self.draft.validate() {
            Ok(payload) => {
                self.errors = DraftErrors::default();
                self.phase = CreatorPhase::Submitting;
                self.pending = Some(submission_id);
                Some(CreateRequest {
                    submission_id,
                    payload,
                })
            }
            Err(errors) => {
                tracing::debug!(invalid = errors.len(), "Draft rejected");
                if let Some(first) = errors.iter().next() {
                    self.focus = first.field();
                }
                self.errors = errors;
                None
            }
        }
    }

    /// Apply the outcome of the create request sent as `submission_id`.
    ///
    /// Success invalidates every cached notes listing before the modal closes.
    /// Failure keeps the draft and records the error. A result for another
    /// submission still invalidates on success but never touches this form.
    pub fn complete(
        &mut self,
        submission_id: u64,
        result: NoteHubResult<Note>,
    ) -> CacheResult<CreatorOutcome> {
        if self.pending != Some(submission_id) {
            if let Ok(note) = &result {
                invalidate_notes(&self.cache)?;
                tracing::info!(id = %note.id, submission_id, "Note created by an earlier form");
            }
            return Ok(CreatorOutcome::StayOpen);
        }
        self.pending = None;
        let was_submitting = self.is_submitting();
        match result {
            Ok(note) => {
                let stale = invalidate_notes(&self.cache)?;
                tracing::info!(id = %note.id, invalidated = stale, "Note created");
                self.phase = CreatorPhase::Idle;
                self.submit_attempted = false;
                Ok(if was_submitting {
                    CreatorOutcome::Close
                } else {
                    CreatorOutcome::StayOpen
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, "Note creation failed");
                if was_submitting {
                    self.phase = CreatorPhase::Failed(err.to_string());
                }
                Ok(CreatorOutcome::StayOpen)
            }
        }
    }
}
