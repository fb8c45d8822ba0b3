use std::path::Path;

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use memento_memory::config::Credentials;
use memento_memory::config::JournalConfig;
use memento_memory::factory;
use memento_tui::app::App;
use memento_tui::app::Control;
use memento_tui::app::Status;
use memento_tui::session::Page;
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use super::screen;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn app(root: &Path, credentials: Option<Credentials>) -> App {
    let service = factory::open_journal(root, &JournalConfig::default());
    App::new(service, credentials, 3, date("2024-05-01"))
}

fn creds() -> Credentials {
    Credentials {
        username: "us".into(),
        password: "secret".into(),
    }
}

fn press(app: &mut App, code: KeyCode) -> Control {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(app: &mut App, c: char) -> Control {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    screen(&terminal)
}

fn login(app: &mut App, username: &str, password: &str) {
    type_str(app, username);
    press(app, KeyCode::Enter);
    type_str(app, password);
    press(app, KeyCode::Enter);
}

#[test]
fn wrong_password_stays_on_login() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), Some(creds()));
    assert_eq!(app.session().page(), Page::Login);

    login(&mut app, "us", "nope");
    assert_eq!(app.session().page(), Page::Login);
    assert!(!app.session().logged_in());
    let text = draw(&app);
    assert!(text.contains("Welcome to Our Memory Space"));
    assert!(text.contains("Invalid credentials. Try again."));
    assert!(!text.contains("nope"));
}

#[test]
fn function_keys_do_nothing_before_login() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), Some(creds()));
    press(&mut app, KeyCode::F(2));
    press(&mut app, KeyCode::F(3));
    assert_eq!(app.session().page(), Page::Login);
}

#[test]
fn login_then_logout() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), Some(creds()));
    login(&mut app, "us", "secret");
    assert!(app.session().logged_in());
    assert_eq!(app.session().page(), Page::Upload);
    assert_eq!(
        app.status(),
        Some(&Status::Info("Login successful!".to_string()))
    );
    assert!(draw(&app).contains("F4 Logout"));

    press(&mut app, KeyCode::F(4));
    assert!(!app.session().logged_in());
    assert_eq!(app.session().page(), Page::Login);
}

#[test]
fn logout_clears_the_upload_form() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), Some(creds()));
    login(&mut app, "us", "secret");
    type_str(&mut app, "/holiday/pier.png");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "half-written caption");
    assert!(draw(&app).contains("/holiday/pier.png"));

    press(&mut app, KeyCode::F(4));
    login(&mut app, "us", "secret");
    let text = draw(&app);
    assert!(!text.contains("/holiday/pier.png"));
    assert!(!text.contains("half-written caption"));
    assert!(text.contains("2024-05-01"));
}

#[test]
fn without_credentials_the_gate_is_open() {
    let dir = tempdir().unwrap();
    let app = app(dir.path(), None);
    assert!(app.session().logged_in());
    assert_eq!(app.session().page(), Page::Upload);
}

#[test]
fn upload_form_saves_a_memory() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("incoming");
    std::fs::create_dir(&src).unwrap();
    let image = src.join("sunset.png");
    image::DynamicImage::new_rgb8(4, 3).save(&image).unwrap();

    let mut app = app(dir.path(), None);
    app.handle_paste(image.to_str().unwrap());
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "sunset over the bay");
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        app.status(),
        Some(&Status::Info(
            "Memory saved successfully! (sunset.png, PNG 4x3)".to_string()
        ))
    );
    assert!(dir.path().join("images/sunset.png").exists());
    let table = std::fs::read_to_string(dir.path().join("data/memories.csv")).unwrap();
    assert_eq!(
        table,
        "Image,Date,Caption\nsunset.png,2024-05-01,sunset over the bay\n"
    );

    press(&mut app, KeyCode::F(2));
    assert_eq!(app.session().page(), Page::Timeline);
    assert_eq!(app.memories().len(), 1);
    let text = draw(&app);
    assert!(text.contains("Your Memories"));
    assert!(text.contains("2024-05-01 - sunset over the bay"));
}

#[test]
fn upload_requires_a_path_and_a_valid_date() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), None);
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.status(),
        Some(&Status::Error("Choose an image file first.".to_string()))
    );

    type_str(&mut app, "/nowhere/pic.png");
    press(&mut app, KeyCode::Tab);
    ctrl(&mut app, 'u');
    type_str(&mut app, "yesterday");
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.status(),
        Some(&Status::Error(
            "Date of capture must look like YYYY-MM-DD.".to_string()
        ))
    );
    assert!(!dir.path().join("data/memories.csv").exists());
}

#[test]
fn upload_rejects_other_file_types() {
    let dir = tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "hello").unwrap();

    let mut app = app(dir.path(), None);
    app.handle_paste(notes.to_str().unwrap());
    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.status(), Some(Status::Error(_))));
    assert!(!dir.path().join("images").exists());
}

#[test]
fn quit_keys() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), None);
    // On a form, q is text.
    assert_eq!(press(&mut app, KeyCode::Char('q')), Control::Continue);
    press(&mut app, KeyCode::F(3));
    assert_eq!(press(&mut app, KeyCode::Char('q')), Control::Quit);
    assert_eq!(ctrl(&mut app, 'c'), Control::Quit);
}

#[test]
fn key_releases_are_ignored() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path(), None);
    let release = KeyEvent::new_with_kind(KeyCode::F(3), KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(app.handle_key(release), Control::Continue);
    assert_eq!(app.session().page(), Page::Upload);
}
