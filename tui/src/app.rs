use std::path::Path;

use chrono::Days;
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use memento_memory::config::Credentials;
use memento_memory::config::clamp_grid_columns;
use memento_memory::service::MemoryService;
use memento_memory::types::ResolvedMemory;
use memento_memory::types::format_date;
use memento_memory::types::parse_date;
use memento_memory::upload::Upload;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

use crate::form::Form;
use crate::form::TextField;
use crate::session::Page;
use crate::session::Session;
use crate::views::dashboard::DashboardView;
use crate::views::login::LoginView;
use crate::views::timeline::TimelineView;
use crate::views::upload::UploadView;

const UPLOAD_PATH: usize = 0;
const UPLOAD_DATE: usize = 1;
const UPLOAD_CAPTION: usize = 2;

/// Whether the event loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Message shown in the footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    service: MemoryService,
    credentials: Option<Credentials>,
    grid_columns: usize,
    today: NaiveDate,
    session: Session,
    login: Form,
    login_error: Option<String>,
    upload: Form,
    timeline_filter: Option<NaiveDate>,
    timeline_scroll: u16,
    dashboard_scroll: usize,
    dates: Vec<NaiveDate>,
    memories: Vec<ResolvedMemory>,
    status: Option<Status>,
}

fn login_form() -> Form {
    Form::new(vec![TextField::new("Username"), TextField::masked("Password")])
}

fn upload_form(today: NaiveDate) -> Form {
    Form::new(vec![
        TextField::new("Image path"),
        TextField::new("Date of capture").with_value(format_date(today)),
        TextField::new("Caption"),
    ])
}

impl App {
    /// Without credentials the login gate is open.
    pub fn new(
        service: MemoryService,
        credentials: Option<Credentials>,
        grid_columns: usize,
        today: NaiveDate,
    ) -> Self {
        let mut app = Self {
            service,
            session: Session::new(credentials.is_some()),
            credentials,
            grid_columns: clamp_grid_columns(grid_columns),
            today,
            login: login_form(),
            login_error: None,
            upload: upload_form(today),
            timeline_filter: Some(today),
            timeline_scroll: 0,
            dashboard_scroll: 0,
            dates: Vec::new(),
            memories: Vec::new(),
            status: None,
        };
        app.refresh();
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn memories(&self) -> &[ResolvedMemory] {
        &self.memories
    }

    pub fn timeline_filter(&self) -> Option<NaiveDate> {
        self.timeline_filter
    }

    /// Reload the memories the current page shows.
    pub fn refresh(&mut self) {
        let filter = match self.session.page() {
            Page::Timeline => self.timeline_filter,
            _ => None,
        };
        let loaded = self
            .service
            .capture_dates()
            .and_then(|dates| Ok((dates, self.service.list_memories(filter)?)));
        match loaded {
            Ok((dates, memories)) => {
                self.dates = dates;
                self.memories = memories;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load memories");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Control::Quit;
        }
        if self.session.logged_in() {
            let target = match key.code {
                KeyCode::F(1) => Some(Page::Upload),
                KeyCode::F(2) => Some(Page::Timeline),
                KeyCode::F(3) => Some(Page::Dashboard),
                KeyCode::F(4) => {
                    self.logout();
                    return Control::Continue;
                }
                _ => None,
            };
            if let Some(page) = target {
                self.open(page);
                return Control::Continue;
            }
        }
        match self.session.page() {
            Page::Login => self.login_key(key),
            Page::Upload => self.upload_key(key),
            Page::Timeline => self.timeline_key(key),
            Page::Dashboard => self.dashboard_key(key),
        }
    }

    /// Bracketed paste goes into the focused form field.
    pub fn handle_paste(&mut self, text: &str) {
        let form = match self.session.page() {
            Page::Login => &mut self.login,
            Page::Upload => &mut self.upload,
            Page::Timeline | Page::Dashboard => return,
        };
        if let Some(field) = form.focused() {
            field.insert_str(text);
        }
    }

    fn open(&mut self, page: Page) {
        if self.session.navigate(page) {
            self.status = None;
            self.timeline_scroll = 0;
            self.refresh();
        }
    }

    fn logout(&mut self) {
        self.session.log_out();
        self.login = login_form();
        self.login_error = None;
        self.upload = upload_form(self.today);
        self.dashboard_scroll = 0;
        self.status = Some(Status::Info("Logged out.".to_string()));
        tracing::info!("logged out");
    }

    fn login_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Enter if !self.login.is_last_focused() => self.login.focus_next(),
            KeyCode::Enter => self.submit_login(),
            _ => {
                self.login.handle_key(key);
            }
        }
        Control::Continue
    }

    fn submit_login(&mut self) {
        let username = self.login.value(0);
        let accepted = match &self.credentials {
            Some(creds) => creds.verify(username, self.login.value(1)),
            None => true,
        };
        if accepted {
            tracing::info!(username, "login succeeded");
            self.session.log_in();
            self.login = login_form();
            self.login_error = None;
            self.status = Some(Status::Info("Login successful!".to_string()));
            self.refresh();
        } else {
            tracing::warn!(username, "login failed");
            self.login_error = Some("Invalid credentials. Try again.".to_string());
            if let Some(password) = self.login.field_mut(1) {
                password.clear();
            }
        }
    }

    fn upload_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Enter => self.submit_upload(),
            KeyCode::Esc => self.status = None,
            _ => {
                self.upload.handle_key(key);
            }
        }
        Control::Continue
    }

    fn submit_upload(&mut self) {
        let path = self.upload.value(UPLOAD_PATH).trim().to_string();
        if path.is_empty() {
            self.status = Some(Status::Error("Choose an image file first.".to_string()));
            return;
        }
        let Ok(date) = parse_date(self.upload.value(UPLOAD_DATE)) else {
            self.status = Some(Status::Error(
                "Date of capture must look like YYYY-MM-DD.".to_string(),
            ));
            return;
        };
        let caption = self.upload.value(UPLOAD_CAPTION).to_string();

        let saved = Upload::from_path(Path::new(&path)).and_then(|upload| {
            let record = self
                .service
                .save_memory(&upload.bytes, &upload.filename, date, &caption)?;
            Ok((record, upload.summary()))
        });
        match saved {
            Ok((record, summary)) => {
                tracing::info!(image = %record.image, %summary, "memory saved from upload form");
                for idx in [UPLOAD_PATH, UPLOAD_CAPTION] {
                    if let Some(field) = self.upload.field_mut(idx) {
                        field.clear();
                    }
                }
                self.upload.focus = UPLOAD_PATH;
                self.status = Some(Status::Info(format!(
                    "Memory saved successfully! ({}, {summary})",
                    record.image
                )));
                self.refresh();
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "upload rejected");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    fn timeline_key(&mut self, key: KeyEvent) -> Control {
        let base = self.timeline_filter.unwrap_or(self.today);
        match key.code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Left => {
                if let Some(day) = base.checked_sub_days(Days::new(1)) {
                    self.set_filter(Some(day));
                }
            }
            KeyCode::Right => {
                if let Some(day) = base.checked_add_days(Days::new(1)) {
                    self.set_filter(Some(day));
                }
            }
            KeyCode::Char('[') => {
                let previous = self.dates.iter().rev().find(|d| **d < base).copied();
                if previous.is_some() {
                    self.set_filter(previous);
                }
            }
            KeyCode::Char(']') => {
                let next = self.dates.iter().find(|d| **d > base).copied();
                if next.is_some() {
                    self.set_filter(next);
                }
            }
            KeyCode::Char('t') => self.set_filter(Some(self.today)),
            KeyCode::Char('a') => self.set_filter(None),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Up => self.timeline_scroll = self.timeline_scroll.saturating_sub(1),
            KeyCode::Down => self.timeline_scroll = self.timeline_scroll.saturating_add(1),
            _ => {}
        }
        Control::Continue
    }

    fn set_filter(&mut self, filter: Option<NaiveDate>) {
        self.timeline_filter = filter;
        self.timeline_scroll = 0;
        self.refresh();
    }

    fn dashboard_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Up => self.dashboard_scroll = self.dashboard_scroll.saturating_sub(1),
            KeyCode::Down => {
                let rows = DashboardView::row_count(&self.memories, self.grid_columns);
                if self.dashboard_scroll + 1 < rows {
                    self.dashboard_scroll += 1;
                }
            }
            _ => {}
        }
        Control::Continue
    }

    pub fn render(&self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let page = self.session.page();
        let mut header_lines = vec![Line::raw(page.title()).bold()];
        if self.session.logged_in() {
            header_lines.push(
                Line::raw("F1 Upload  F2 View Memories  F3 Dashboard  F4 Logout  Ctrl-C Quit")
                    .dim(),
            );
        }
        frame.render_widget(Paragraph::new(header_lines), header);

        let buf = frame.buffer_mut();
        match page {
            Page::Login => LoginView {
                form: &self.login,
                error: self.login_error.as_deref(),
            }
            .render_ref(body, buf),
            Page::Upload => UploadView { form: &self.upload }.render_ref(body, buf),
            Page::Timeline => TimelineView {
                memories: &self.memories,
                filter: self.timeline_filter,
                journal_empty: self.dates.is_empty(),
                scroll: self.timeline_scroll,
            }
            .render_ref(body, buf),
            Page::Dashboard => DashboardView {
                memories: &self.memories,
                columns: self.grid_columns,
                scroll: self.dashboard_scroll,
            }
            .render_ref(body, buf),
        }

        let status = match &self.status {
            Some(Status::Info(text)) => Line::raw(text.clone()).green(),
            Some(Status::Error(text)) => Line::raw(text.clone()).red(),
            None => Line::raw(""),
        };
        frame.render_widget(Paragraph::new(status), footer);
    }
}
