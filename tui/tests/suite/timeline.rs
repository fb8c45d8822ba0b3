use std::path::Path;

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use memento_memory::config::JournalConfig;
use memento_memory::factory;
use memento_tui::app::App;
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use super::screen;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seed(root: &Path, rows: &[(&str, &str, &str)]) {
    let service = factory::open_journal(root, &JournalConfig::default());
    for (image, day, caption) in rows {
        service
            .save_memory(b"not really a picture", image, date(day), caption)
            .unwrap();
    }
}

fn timeline(root: &Path, today: &str) -> App {
    let service = factory::open_journal(root, &JournalConfig::default());
    let mut app = App::new(service, None, 3, date(today));
    press(&mut app, KeyCode::F(2));
    app
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    screen(&terminal)
}

fn images(app: &App) -> Vec<String> {
    app.memories()
        .iter()
        .map(|m| m.record.image.clone())
        .collect()
}

#[test]
fn empty_journal_says_so() {
    let dir = tempdir().unwrap();
    let app = timeline(dir.path(), "2024-01-03");
    assert!(draw(&app).contains("No memories saved yet."));
}

#[test]
fn starts_on_today_and_steps_between_dates() {
    let dir = tempdir().unwrap();
    seed(
        dir.path(),
        &[
            ("a.jpg", "2024-01-01", "first"),
            ("b.jpg", "2024-01-05", "second"),
            ("c.jpg", "2024-01-01", "third"),
        ],
    );
    let mut app = timeline(dir.path(), "2024-01-03");
    assert_eq!(app.timeline_filter(), Some(date("2024-01-03")));
    assert!(app.memories().is_empty());
    let text = draw(&app);
    assert!(text.contains("Filter by date: 2024-01-03"));
    assert!(text.contains("No memories found for that date."));

    press(&mut app, KeyCode::Char('['));
    assert_eq!(app.timeline_filter(), Some(date("2024-01-01")));
    assert_eq!(images(&app), vec!["a.jpg", "c.jpg"]);
    // Nothing earlier; the filter stays put.
    press(&mut app, KeyCode::Char('['));
    assert_eq!(app.timeline_filter(), Some(date("2024-01-01")));

    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.timeline_filter(), Some(date("2024-01-05")));
    assert_eq!(images(&app), vec!["b.jpg"]);

    press(&mut app, KeyCode::Right);
    assert_eq!(app.timeline_filter(), Some(date("2024-01-06")));
    assert!(app.memories().is_empty());
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.timeline_filter(), Some(date("2024-01-04")));

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.timeline_filter(), None);
    assert_eq!(images(&app), vec!["a.jpg", "b.jpg", "c.jpg"]);
    assert!(draw(&app).contains("Filter by date: all dates"));

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.timeline_filter(), Some(date("2024-01-03")));
}

#[test]
fn missing_images_are_hidden_and_counted() {
    let dir = tempdir().unwrap();
    seed(
        dir.path(),
        &[
            ("kept.jpg", "2024-01-01", "still here"),
            ("gone.jpg", "2024-01-01", "deleted later"),
        ],
    );
    std::fs::remove_file(dir.path().join("images/gone.jpg")).unwrap();

    let app = timeline(dir.path(), "2024-01-01");
    assert_eq!(app.memories().len(), 2);
    let text = draw(&app);
    assert!(text.contains("2024-01-01 - still here"));
    assert!(!text.contains("deleted later"));
    assert!(text.contains("1 hidden: image file missing"));
}
