//! Application state for the NoteHub TUI.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use notehub_cache::QueryCache;
use notehub_core::{DraftField, Note, NoteHubResult, NotesApi, NotesPage, QueryKey, TagFilter};

use crate::browser::{FetchRequest, InitialData, NotesBrowser};
use crate::config::TuiConfig;
use crate::creator::{invalidate_notes, CreateRequest, CreatorOutcome};
use crate::error::TuiError;
use crate::events::TuiEvent;
use crate::keys::{map_key, Action, InputMode};
use crate::nav::{next_filter, previous_filter, Focus, PageMove};
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::PersistedState;
use crate::theme::SynthBruteTheme;

/// Work the event loop must start on behalf of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    Create(CreateRequest),
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub api: Arc<dyn NotesApi>,
    pub cache: QueryCache<QueryKey, NotesPage>,
    pub browser: NotesBrowser,
    pub focus: Focus,
    pub notifications: Vec<Notification>,
    pub should_quit: bool,
    last_submission: u64,
}

impl App {
    pub fn new(
        config: TuiConfig,
        api: Arc<dyn NotesApi>,
        tag: TagFilter,
        initial: Option<InitialData>,
    ) -> Result<Self, TuiError> {
        let cache = QueryCache::new(config.cache_config());
        let browser = NotesBrowser::new(cache.clone(), tag, config.search_debounce(), initial)?;
        Ok(Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            api,
            cache,
            browser,
            focus: Focus::Notes,
            notifications: Vec::new(),
            should_quit: false,
            last_submission: 0,
        })
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Most recent notification still worth showing.
    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn input_mode(&self) -> InputMode {
        if self.browser.creator().is_some() {
            InputMode::Form
        } else if self.focus == Focus::Search {
            InputMode::Search
        } else {
            InputMode::Browse
        }
    }

    /// Requests needed to bring the screen in line with the current key.
    pub fn reconcile(&mut self) -> Result<Vec<Effect>, TuiError> {
        Ok(self.browser.next_fetch()?.into_iter().map(Effect::Fetch).collect())
    }

    pub fn handle_event(&mut self, event: TuiEvent, now: Instant) -> Result<Vec<Effect>, TuiError> {
        let mut effects = Vec::new();
        match event {
            TuiEvent::Input(key) => {
                if let Some(action) = map_key(key, self.input_mode()) {
                    effects.extend(self.apply_action(action, now)?);
                }
            }
            TuiEvent::Tick => {
                let now_utc = Utc::now();
                self.notifications.retain(|n| !n.is_expired(now_utc));
            }
            TuiEvent::Resize { .. } => {}
            TuiEvent::SearchDeadline => {
                self.browser.poll_search(now);
            }
            TuiEvent::NotesFetched { request_id, result } => {
                self.browser.apply_fetch_result(request_id, result)?;
            }
            TuiEvent::NoteCreated {
                submission_id,
                result,
            } => self.note_created(submission_id, result)?,
        }
        effects.extend(self.reconcile()?);
        Ok(effects)
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Result<Vec<Effect>, TuiError> {
        let mut effects = self.apply_action(action, now)?;
        effects.extend(self.reconcile()?);
        Ok(effects)
    }

    fn apply_action(&mut self, action: Action, now: Instant) -> Result<Vec<Effect>, TuiError> {
        let mut effects = Vec::new();
        match action {
            Action::Quit => self.should_quit = true,
            Action::Refresh => {
                if let Some(request) = self.browser.refresh()? {
                    effects.push(Effect::Fetch(request));
                }
            }
            Action::OpenSearch => self.focus = Focus::Search,
            Action::CloseSearch => self.focus = Focus::Notes,
            Action::SearchInput(c) => self.browser.push_search_char(c, now),
            Action::SearchBackspace => self.browser.pop_search_char(now),
            Action::SearchClear => self.browser.set_search_input(String::new(), now),
            Action::NextTag => self.browser.set_tag(next_filter(self.browser.tag())),
            Action::PrevTag => self.browser.set_tag(previous_filter(self.browser.tag())),
            Action::MoveUp => self.browser.select_previous(),
            Action::MoveDown => self.browser.select_next(),
            Action::FirstPage => self.move_page(PageMove::First),
            Action::PrevPage => self.move_page(PageMove::Previous),
            Action::NextPage => self.move_page(PageMove::Next),
            Action::LastPage => self.move_page(PageMove::Last),
            Action::NewNote => self.browser.open_creator(),
            Action::Cancel => {
                if self.browser.close_creator().is_some() {
                    tracing::debug!("Note creation cancelled");
                }
            }
            Action::NextField
            | Action::PrevField
            | Action::FieldInput(_)
            | Action::FieldBackspace
            | Action::FieldNewline
            | Action::NextOption
            | Action::PrevOption
            | Action::Submit => {
                if let Some(request) = self.apply_form_action(action) {
                    effects.push(Effect::Create(request));
                }
            }
        }
        Ok(effects)
    }

    fn apply_form_action(&mut self, action: Action) -> Option<CreateRequest> {
        let submission_id = self.last_submission + 1;
        let creator = self.browser.creator_mut()?;
        match action {
            Action::NextField => creator.focus_next(),
            Action::PrevField => creator.focus_previous(),
            Action::FieldInput(c) => creator.insert_char(c),
            Action::FieldBackspace => creator.backspace(),
            Action::FieldNewline => creator.insert_newline(),
            Action::NextOption | Action::PrevOption => {
                if creator.focus() == DraftField::Tag {
                    creator.cycle_tag(action == Action::NextOption);
                }
            }
            Action::Submit => {
                let request = creator.submit(submission_id)?;
                self.last_submission = submission_id;
                return Some(request);
            }
            _ => {}
        }
        None
    }

    fn move_page(&mut self, movement: PageMove) {
        let Some(info) = self.browser.pagination() else {
            return;
        };
        self.browser.set_page(movement.apply(info.current, info.total));
    }

    fn note_created(
        &mut self,
        submission_id: u64,
        result: NoteHubResult<Note>,
    ) -> Result<(), TuiError> {
        let owner = self
            .browser
            .creator_mut()
            .filter(|c| c.pending_submission() == Some(submission_id));
        let Some(creator) = owner else {
            // Sent by a form that was since closed; a stored note still makes listings stale.
            match result {
                Ok(note) => {
                    invalidate_notes(&self.cache)?;
                    tracing::info!(id = %note.id, submission_id, "Note created after its form was closed");
                    self.notify(NotificationLevel::Success, "Note created");
                }
                Err(err) => {
                    tracing::warn!(submission_id, error = %err, "Create from a closed form failed");
                }
            }
            return Ok(());
        };

        let failed = result.as_ref().err().map(|e| e.to_string());
        match creator.complete(submission_id, result)? {
            CreatorOutcome::Close => {
                self.browser.close_creator();
                self.notify(NotificationLevel::Success, "Note created");
            }
            CreatorOutcome::StayOpen => {
                if let Some(message) = failed {
                    self.notify(
                        NotificationLevel::Error,
                        format!("Failed to create note: {}", message),
                    );
                }
            }
        }
        Ok(())
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            tag_filter: self.browser.tag(),
        }
    }

    /// Release the shared cache.
    pub fn shutdown(&self) -> Result<(), TuiError> {
        self.cache.clear()?;
        Ok(())
    }
}
