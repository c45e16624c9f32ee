//! Draws the view state with ratatui widgets.
//!
//! The frame is split into the task form, the task list and a one-line
//! footer with key hints or the delete confirmation.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::screen::{Focus, Screen};
use super::view_model::{Mode, ViewState};

const LIST_HINTS: &str = "a add  e edit  d delete  s show/hide  r refresh  q quit";
const FORM_HINTS: &str = "Enter submit  Tab next field  Esc back";

/// Draws the whole client into `frame`.
pub fn render(frame: &mut Frame, state: &ViewState, screen: &mut Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_form(frame, chunks[0], state, screen.focus);
    render_tasks(frame, chunks[1], state, screen);
    render_footer(frame, chunks[2], screen);
}

fn render_form(frame: &mut Frame, area: Rect, state: &ViewState, focus: Focus) {
    let title = match state.mode() {
        Mode::Create => " New task ".to_string(),
        Mode::Edit(id) => format!(" Editing task #{id} "),
    };
    let in_form = matches!(focus, Focus::Title | Focus::Description);

    let lines = vec![
        field_line("Title:       ", &state.title, focus == Focus::Title),
        field_line("Description: ", &state.description, focus == Focus::Description),
        Line::from(Span::styled(
            format!("[ {} ]", state.submit_label()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(focus_style(in_form)),
    );
    frame.render_widget(form, area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![Span::styled(label, label_style), Span::raw(value)])
}

fn render_tasks(frame: &mut Frame, area: Rect, state: &ViewState, screen: &mut Screen) {
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_style(focus_style(screen.focus == Focus::List));

    if !state.list_visible {
        let hidden = Paragraph::new("List hidden. Press s to show it.").block(block);
        frame.render_widget(hidden, area);
        return;
    }

    let placeholder = if state.loading {
        Some("Loading...")
    } else if state.tasks.is_empty() {
        Some("No tasks.")
    } else {
        None
    };
    if let Some(text) = placeholder {
        frame.render_widget(List::new([ListItem::new(text)]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .tasks
        .iter()
        .map(|task| {
            let mut spans = vec![
                Span::raw(format!("#{} ", task.id)),
                Span::styled(task.title.as_str(), Style::default().fg(Color::White)),
            ];
            if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
                spans.push(Span::raw(format!(" - {description}")));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    frame.render_stateful_widget(list, area, &mut screen.list);
}

fn render_footer(frame: &mut Frame, area: Rect, screen: &Screen) {
    let footer = match screen.pending_delete {
        Some(id) => Paragraph::new(format!("Delete task #{id}? (y/N)"))
            .style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(match screen.focus {
            Focus::List => LIST_HINTS,
            Focus::Title | Focus::Description => FORM_HINTS,
        }),
    };
    frame.render_widget(footer, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskId};
    use crate::ui::view_model::{Action, reduce};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use rstest::rstest;

    fn lines(buffer: &Buffer) -> Vec<String> {
        buffer
            .content
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn draw(state: &ViewState, screen: &mut Screen) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();
        terminal
            .draw(|frame| render(frame, state, screen))
            .unwrap();
        lines(terminal.backend().buffer())
    }

    fn screen_for(state: &ViewState) -> Screen {
        let mut screen = Screen::new();
        screen.sync(state);
        screen
    }

    fn contains(lines: &[String], text: &str) -> bool {
        lines.iter().any(|line| line.contains(text))
    }

    #[rstest]
    fn test_render_create_mode_uses_add_label() {
        let state = ViewState::new(false);
        let output = draw(&state, &mut screen_for(&state));

        assert!(contains(&output, "New task"));
        assert!(contains(&output, "[ Add task ]"));
        assert!(contains(&output, "List hidden"));
    }

    #[rstest]
    fn test_render_edit_mode_uses_save_label() {
        let state = reduce(
            ViewState::new(false),
            Action::StartEdit(Task::new(TaskId::new(3), "Buy milk", None)),
        );

        let output = draw(&state, &mut screen_for(&state));

        assert!(contains(&output, "Editing task #3"));
        assert!(contains(&output, "[ Save changes ]"));
        assert!(contains(&output, "Title:       Buy milk"));
    }

    #[rstest]
    fn test_render_lists_tasks_in_order_with_selection() {
        let state = reduce(
            ViewState::new(true),
            Action::TasksLoaded(vec![
                Task::new(TaskId::new(2), "B", None),
                Task::new(TaskId::new(1), "A", Some("first".to_string())),
            ]),
        );

        let output = draw(&state, &mut screen_for(&state));

        let b = output.iter().position(|line| line.contains(">> #2 B"));
        let a = output.iter().position(|line| line.contains("#1 A - first"));
        assert!(b.is_some() && a.is_some());
        assert!(b < a);
    }

    #[rstest]
    fn test_render_loading_placeholder() {
        let state = reduce(ViewState::new(true), Action::Refresh);
        assert!(contains(&draw(&state, &mut screen_for(&state)), "Loading..."));
    }

    #[rstest]
    fn test_render_empty_list() {
        let state = ViewState::new(true);
        assert!(contains(&draw(&state, &mut screen_for(&state)), "No tasks."));
    }

    #[rstest]
    fn test_render_delete_confirmation() {
        let state = ViewState::new(true);
        let mut screen = screen_for(&state);
        screen.pending_delete = Some(TaskId::new(7));

        let output = draw(&state, &mut screen);

        assert!(contains(&output, "Delete task #7? (y/N)"));
    }
}
