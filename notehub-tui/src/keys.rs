//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which keymap applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    OpenSearch,
    CloseSearch,
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    NextTag,
    PrevTag,
    MoveUp,
    MoveDown,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    NewNote,
    NextField,
    PrevField,
    FieldInput(char),
    FieldBackspace,
    FieldNewline,
    NextOption,
    PrevOption,
    Submit,
    Cancel,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match (code, mode) {
            (KeyCode::Char('c'), _) => Some(Action::Quit),
            (KeyCode::Char('r'), InputMode::Browse | InputMode::Search) => Some(Action::Refresh),
            (KeyCode::Char('u'), InputMode::Search) => Some(Action::SearchClear),
            (KeyCode::Char('s'), InputMode::Form) => Some(Action::Submit),
            _ => None,
        };
    }

    match mode {
        InputMode::Browse => map_browse(code),
        InputMode::Search => map_search(code),
        InputMode::Form => map_form(code, modifiers),
    }
}

fn map_browse(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('n') => Some(Action::NewNote),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Tab => Some(Action::NextTag),
        KeyCode::BackTab => Some(Action::PrevTag),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPage),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPage),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage),
        _ => None,
    }
}

fn map_search(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc | KeyCode::Enter => Some(Action::CloseSearch),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Tab => Some(Action::NextTag),
        KeyCode::BackTab => Some(Action::PrevTag),
        KeyCode::Char(c) => Some(Action::SearchInput(c)),
        _ => None,
    }
}

fn map_form(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => Some(Action::FieldNewline),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
        KeyCode::Right => Some(Action::NextOption),
        KeyCode::Left => Some(Action::PrevOption),
        KeyCode::Backspace => Some(Action::FieldBackspace),
        KeyCode::Char(c) => Some(Action::FieldInput(c)),
        _ => None,
    }
}
