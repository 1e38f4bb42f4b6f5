use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use taskpad_core::task::{CreateTask, Status, Task, UpdateTask};
use taskpad_service::BlockingHttpService;

use crate::components::task_list::TaskList;
use crate::theme::Theme;

/// What the app is currently doing
#[derive(Debug, Clone)]
pub enum Mode {
    /// Normal list navigation, form closed
    Normal,
    /// Filling the form for a new task
    CreateTask { form: TaskForm },
    /// Editing an existing task. The task is retained so the update can
    /// reuse its id and current status.
    EditTask { task: Task, form: TaskForm },
    /// Confirm delete
    ConfirmDelete { task: Task },
}

/// The transient, unsaved draft the user is typing before submit.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub field: FormField,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Description,
}

impl TaskForm {
    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            field: FormField::Title,
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }

    fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }
}

pub struct App {
    service: BlockingHttpService,
    list: TaskList,
    mode: Mode,
    theme: Theme,
    status_message: Option<String>,
}

impl App {
    /// Fetch the list once and start in Normal mode. A failed initial fetch
    /// surfaces the fetch error and starts with an empty list.
    pub fn new(service: BlockingHttpService) -> Self {
        let (tasks, status_message) = match service.list_tasks() {
            Ok(tasks) => (tasks, None),
            Err(e) => {
                tracing::warn!(error = %e, "initial fetch failed");
                (Vec::new(), Some("Failed to fetch todos".to_string()))
            }
        };
        Self {
            service,
            list: TaskList::new(tasks),
            mode: Mode::Normal,
            theme: Theme::dark(),
            status_message,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.list.selected_task()
    }

    pub fn task_count(&self) -> usize {
        self.list.len()
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::CreateTask { .. } | Mode::EditTask { .. })
    }

    /// Re-fetch the whole list. On failure the prior contents are kept and
    /// the fetch error is surfaced.
    fn refresh(&mut self) {
        let selected_id = self.list.selected_task().map(|t| t.id);
        match self.service.list_tasks() {
            Ok(tasks) => {
                self.list.set_tasks(tasks);
                if let Some(id) = selected_id {
                    self.list.select_task_by_id(id);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                self.status_message = Some("Failed to fetch todos".into());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match &self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::CreateTask { form } => self.handle_create(key, form.clone()),
            Mode::EditTask { task, form } => self.handle_edit(key, task.clone(), form.clone()),
            Mode::ConfirmDelete { task } => self.handle_confirm_delete(key, task.clone()),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => {
                self.mode = Mode::CreateTask {
                    form: TaskForm::default(),
                };
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.list.selected_task() {
                    self.mode = Mode::EditTask {
                        task: task.clone(),
                        form: TaskForm::from_task(task),
                    };
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.list.selected_task() {
                    self.mode = Mode::ConfirmDelete { task: task.clone() };
                }
            }
            KeyCode::Char(' ') => {
                if let Some(task) = self.list.selected_task() {
                    let flipped = task.with_status(task.status.toggled());
                    match self.service.replace_task(&flipped) {
                        Ok(()) => self.refresh(),
                        Err(e) => {
                            tracing::warn!(error = %e, task_id = flipped.id, "toggle failed");
                            self.status_message = Some("Failed to update status".into());
                        }
                    }
                }
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('t') => self.theme = self.theme.toggled(),
            _ => self.list.handle_key(key),
        }
    }

    fn handle_create(&mut self, key: KeyEvent, mut form: TaskForm) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                form.next_field();
                self.mode = Mode::CreateTask { form };
            }
            KeyCode::Enter => match form.field {
                FormField::Title => {
                    form.field = FormField::Description;
                    self.mode = Mode::CreateTask { form };
                }
                FormField::Description => self.submit_create(form),
            },
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                form.active_field_mut().pop();
                self.mode = Mode::CreateTask { form };
            }
            KeyCode::Char(c) => {
                form.active_field_mut().push(c);
                self.mode = Mode::CreateTask { form };
            }
            _ => {}
        }
    }

    fn handle_edit(&mut self, key: KeyEvent, task: Task, mut form: TaskForm) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                form.next_field();
                self.mode = Mode::EditTask { task, form };
            }
            KeyCode::Enter => match form.field {
                FormField::Title => {
                    form.field = FormField::Description;
                    self.mode = Mode::EditTask { task, form };
                }
                FormField::Description => self.submit_edit(task, form),
            },
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                form.active_field_mut().pop();
                self.mode = Mode::EditTask { task, form };
            }
            KeyCode::Char(c) => {
                form.active_field_mut().push(c);
                self.mode = Mode::EditTask { task, form };
            }
            _ => {}
        }
    }

    fn submit_create(&mut self, form: TaskForm) {
        if form.title.trim().is_empty() {
            self.status_message = Some("Please enter a title".into());
            self.mode = Mode::CreateTask { form };
            return;
        }
        let input = CreateTask {
            title: form.title.clone(),
            description: form.description.clone(),
            status: Status::Pending,
        };
        match self.service.create_task(&input) {
            Ok(()) => {
                self.mode = Mode::Normal;
                self.status_message = Some("Task added".into());
                self.refresh();
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                self.status_message = Some("Failed to add task".into());
                self.mode = Mode::CreateTask { form };
            }
        }
    }

    fn submit_edit(&mut self, task: Task, form: TaskForm) {
        if form.title.trim().is_empty() {
            self.status_message = Some("Please enter a title".into());
            self.mode = Mode::EditTask { task, form };
            return;
        }
        let update = UpdateTask {
            title: form.title.clone(),
            description: form.description.clone(),
            status: task.status,
        };
        match self.service.update_task(task.id, &update) {
            Ok(()) => {
                self.mode = Mode::Normal;
                self.status_message = Some("Task updated".into());
                self.refresh();
            }
            Err(e) => {
                tracing::warn!(error = %e, task_id = task.id, "update failed");
                self.status_message = Some("Failed to update task".into());
                self.mode = Mode::EditTask { task, form };
            }
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent, task: Task) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.service.delete_task(task.id) {
                    Ok(()) => {
                        self.status_message = Some("Task deleted".into());
                        self.refresh();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, task_id = task.id, "delete failed");
                        self.status_message = Some("Failed to delete task".into());
                    }
                }
                self.mode = Mode::Normal;
            }
            _ => self.mode = Mode::Normal,
        }
    }

    //  Rendering

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.background)),
            area,
        );

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.list.render(frame, layout[1], &self.theme);
        self.render_status_bar(frame, layout[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::CreateTask { form } => self.render_task_form(frame, " New Task ", form, area),
            Mode::EditTask { form, .. } => self.render_task_form(frame, " Edit Task ", form, area),
            Mode::ConfirmDelete { task } => self.render_confirm_delete(frame, task, area),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " My Tasks ",
                Style::default().bold().fg(self.theme.text),
            ),
            Span::styled(
                format!("({})", self.list.len()),
                Style::default().fg(self.theme.subtext),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(self.theme.card)),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.status_message {
            let color = if msg.starts_with("Failed") || msg.starts_with("Please") {
                self.theme.danger
            } else {
                self.theme.checkbox
            };
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(color),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("j/k", "move"),
                ("Space", "toggle"),
                ("a", "add"),
                ("e", "edit"),
                ("d", "del"),
                ("r", "refresh"),
                ("t", "theme"),
            ],
            Mode::CreateTask { .. } | Mode::EditTask { .. } => vec![
                ("Tab", "field"),
                ("Enter", "next/submit"),
                ("Esc", "cancel"),
            ],
            Mode::ConfirmDelete { .. } => vec![("y", "confirm"), ("any", "cancel")],
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(
                        format!(" {key}"),
                        Style::default().fg(self.theme.primary).bold(),
                    ),
                    Span::styled(format!(" {desc} "), Style::default().fg(self.theme.subtext)),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }

    fn render_task_form(&self, frame: &mut Frame, title: &str, form: &TaskForm, area: Rect) {
        let popup = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.primary))
            .style(Style::default().bg(self.theme.card));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(inner);

        let field_style = |active: bool| {
            if active {
                Style::default().fg(self.theme.primary).bold()
            } else {
                Style::default().fg(self.theme.border)
            }
        };

        let title_input = Paragraph::new(form.title.as_str())
            .style(Style::default().fg(self.theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(field_style(form.field == FormField::Title))
                    .title(" Task title "),
            );
        frame.render_widget(title_input, chunks[0]);

        let description_input = Paragraph::new(form.description.as_str())
            .style(Style::default().fg(self.theme.text))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(field_style(form.field == FormField::Description))
                    .title(" Description (optional) "),
            );
        frame.render_widget(description_input, chunks[1]);
    }

    fn render_confirm_delete(&self, frame: &mut Frame, task: &Task, area: Rect) {
        let popup = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Delete Task ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.danger))
            .style(Style::default().bg(self.theme.card));

        let text = format!(
            "Are you sure you want to delete \"{}\"?\n\n(y)es / (any key) cancel",
            task.title
        );
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(self.theme.text))
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
