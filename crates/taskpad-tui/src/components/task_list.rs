use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use taskpad_core::task::{Status, Task};

use crate::theme::Theme;

/// The fetched task list and its selection state. The contents are always
/// whatever the most recently completed fetch returned.
pub struct TaskList {
    tasks: Vec<Task>,
    list_state: ListState,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut list_state = ListState::default();
        if !tasks.is_empty() {
            list_state.select(Some(0));
        }
        Self { tasks, list_state }
    }

    /// Replace the contents after a fetch, clamping the selection to the
    /// new length.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if self.tasks.is_empty() {
            self.list_state.select(None);
        } else {
            let idx = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(idx.min(self.tasks.len() - 1)));
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let idx = self.list_state.selected()?;
        self.tasks.get(idx)
    }

    /// Re-select the task with the given id, if it is still present.
    /// Returns `true` when found.
    pub fn select_task_by_id(&mut self, id: i64) -> bool {
        if let Some(idx) = self.tasks.iter().position(|t| t.id == id) {
            self.list_state.select(Some(idx));
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let current = self.list_state.selected().unwrap_or(0);
                if current + 1 < self.tasks.len() {
                    self.list_state.select(Some(current + 1));
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let current = self.list_state.selected().unwrap_or(0);
                if current > 0 {
                    self.list_state.select(Some(current - 1));
                }
            }
            KeyCode::Char('g') => {
                if !self.tasks.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('G') => {
                if !self.tasks.is_empty() {
                    self.list_state.select(Some(self.tasks.len() - 1));
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Tasks ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background));

        if self.tasks.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No tasks yet",
                    Style::default().fg(theme.text).bold(),
                )),
                Line::from(Span::styled(
                    "Press a to add your first task",
                    Style::default().fg(theme.subtext),
                )),
            ];
            let empty = Paragraph::new(lines).alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .map(|task| ListItem::new(render_card(task, theme)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.card))
            .highlight_symbol("> ");

        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// One task as a card: checkbox + title, the description when present,
/// then the creation date and a status badge.
fn render_card<'a>(task: &'a Task, theme: &Theme) -> Text<'a> {
    let done = task.status == Status::Completed;

    let checkbox = Span::styled(
        if done { "[x] " } else { "[ ] " },
        Style::default().fg(if done { theme.checkbox } else { theme.subtext }),
    );
    let title_style = if done {
        Style::default()
            .fg(theme.subtext)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text)
    };

    let mut lines = vec![Line::from(vec![
        checkbox,
        Span::styled(task.title.as_str(), title_style),
    ])];

    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", task.description),
            Style::default().fg(theme.subtext),
        )));
    }

    let badge_bg = if done {
        theme.badge_completed
    } else {
        theme.badge_pending
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("    {}  ", task.created_date()),
            Style::default().fg(theme.subtext),
        ),
        Span::styled(
            format!(" {} ", task.status.display_name()),
            Style::default().fg(theme.text).bg(badge_bg),
        ),
    ]));
    lines.push(Line::from(""));

    Text::from(lines)
}
