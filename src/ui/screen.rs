//! Keyboard handling for the terminal client.
//!
//! [`Screen`] holds what only the terminal needs: focus, list selection and
//! a pending delete confirmation. Key events are translated into view
//! [`Action`]s; the view state itself is never touched here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;

use crate::domain::{Task, TaskId};

use super::view_model::{Action, ViewState};

/// Region that receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Title,
    Description,
}

/// Result of handling one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Feed this action to the view.
    Dispatch(Action),
    /// The key only changed terminal state, or was ignored.
    Handled,
    /// Leave the client.
    Quit,
}

/// Terminal-side state kept next to the view.
#[derive(Debug, Default)]
pub struct Screen {
    pub focus: Focus,
    pub list: ListState,
    /// Task awaiting a `y` to confirm deletion.
    pub pending_delete: Option<TaskId>,
}

impl Screen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the highlighted task, if any.
    #[must_use]
    pub fn selected_task<'a>(&self, state: &'a ViewState) -> Option<&'a Task> {
        self.list.selected().and_then(|index| state.tasks.get(index))
    }

    /// Keeps the selection inside the displayed list.
    pub fn sync(&mut self, state: &ViewState) {
        if !state.list_visible || state.tasks.is_empty() {
            self.list.select(None);
            return;
        }
        let last = state.tasks.len() - 1;
        let index = self.list.selected().unwrap_or(0).min(last);
        self.list.select(Some(index));
    }

    /// Translates a key press into an outcome.
    pub fn handle_key(&mut self, state: &ViewState, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Handled;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }
        if let Some(id) = self.pending_delete.take() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => KeyOutcome::Dispatch(Action::Delete(id)),
                _ => KeyOutcome::Handled,
            };
        }

        match self.focus {
            Focus::List => self.list_key(state, key.code),
            Focus::Title | Focus::Description => self.form_key(state, key),
        }
    }

    fn list_key(&mut self, state: &ViewState, code: KeyCode) -> KeyOutcome {
        match code {
            KeyCode::Char('q') => KeyOutcome::Quit,
            KeyCode::Down | KeyCode::Char('j') => {
                self.step(state, 1);
                KeyOutcome::Handled
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.step(state, -1);
                KeyOutcome::Handled
            }
            KeyCode::Char('a') | KeyCode::Tab => {
                self.focus = Focus::Title;
                KeyOutcome::Handled
            }
            KeyCode::Char('e') | KeyCode::Enter => match self.selected_task(state) {
                Some(task) => {
                    let action = Action::StartEdit(task.clone());
                    self.focus = Focus::Title;
                    KeyOutcome::Dispatch(action)
                }
                None => KeyOutcome::Handled,
            },
            KeyCode::Char('d' | 'x') | KeyCode::Delete => {
                self.pending_delete = self.selected_task(state).map(|task| task.id);
                KeyOutcome::Handled
            }
            KeyCode::Char('s') => KeyOutcome::Dispatch(if state.list_visible {
                Action::HideList
            } else {
                Action::ShowList
            }),
            KeyCode::Char('r') => KeyOutcome::Dispatch(Action::Refresh),
            KeyCode::Esc if state.editing.is_some() => KeyOutcome::Dispatch(Action::CancelEdit),
            _ => KeyOutcome::Handled,
        }
    }

    fn form_key(&mut self, state: &ViewState, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Title => Focus::Description,
                    Focus::Description | Focus::List => Focus::List,
                };
                KeyOutcome::Handled
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Description => Focus::Title,
                    Focus::Title | Focus::List => Focus::List,
                };
                KeyOutcome::Handled
            }
            KeyCode::Enter => KeyOutcome::Dispatch(Action::Submit),
            KeyCode::Esc => {
                self.focus = Focus::List;
                if state.editing.is_some() {
                    KeyOutcome::Dispatch(Action::CancelEdit)
                } else {
                    KeyOutcome::Handled
                }
            }
            KeyCode::Backspace => {
                let mut text = self.field(state).to_string();
                match text.pop() {
                    Some(_) => KeyOutcome::Dispatch(self.field_changed(text)),
                    None => KeyOutcome::Handled,
                }
            }
            KeyCode::Char(character)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text = self.field(state).to_string();
                text.push(character);
                KeyOutcome::Dispatch(self.field_changed(text))
            }
            _ => KeyOutcome::Handled,
        }
    }

    fn field<'a>(&self, state: &'a ViewState) -> &'a str {
        match self.focus {
            Focus::Description => &state.description,
            Focus::Title | Focus::List => &state.title,
        }
    }

    fn field_changed(&self, text: String) -> Action {
        match self.focus {
            Focus::Description => Action::DescriptionChanged(text),
            Focus::Title | Focus::List => Action::TitleChanged(text),
        }
    }

    fn step(&mut self, state: &ViewState, offset: isize) {
        let count = state.tasks.len();
        if count == 0 {
            self.list.select(None);
            return;
        }
        let current = self.list.selected().unwrap_or(0);
        let next = current.saturating_add_signed(offset).min(count - 1);
        self.list.select(Some(next));
    }
}
