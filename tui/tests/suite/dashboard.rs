use std::path::PathBuf;

use chrono::NaiveDate;
use memento_memory::types::MemoryRecord;
use memento_memory::types::ResolvedMemory;
use memento_tui::views::dashboard::CARD_HEIGHT;
use memento_tui::views::dashboard::DashboardView;
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::widgets::WidgetRef;

use super::screen;

fn memory(image: &str, caption: &str, present: bool) -> ResolvedMemory {
    let day = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
    ResolvedMemory {
        record: MemoryRecord::new(image, day, caption),
        media_path: present.then(|| PathBuf::from("images").join(image)),
    }
}

fn draw(view: &DashboardView<'_>, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| view.render_ref(f.area(), f.buffer_mut()))
        .unwrap();
    screen(&terminal)
}

#[test]
fn cards_fill_rows_left_to_right() {
    let memories = vec![
        memory("a.jpg", "one", true),
        memory("b.jpg", "two", true),
        memory("c.jpg", "three", true),
        memory("d.jpg", "four", true),
    ];
    assert_eq!(DashboardView::row_count(&memories, 3), 2);

    let view = DashboardView {
        memories: &memories,
        columns: 3,
        scroll: 0,
    };
    let text = draw(&view, 60, CARD_HEIGHT * 2);
    let lines: Vec<&str> = text.lines().collect();
    let first_row = lines[0];
    assert!(first_row.find("a.jpg") < first_row.find("b.jpg"));
    assert!(first_row.find("b.jpg") < first_row.find("c.jpg"));
    assert!(!first_row.contains("d.jpg"));
    assert!(lines[CARD_HEIGHT as usize].contains("d.jpg"));
    assert!(text.contains("2024-02-14"));
    assert!(text.contains("three"));
}

#[test]
fn scrolling_skips_whole_rows() {
    let memories = vec![
        memory("a.jpg", "one", true),
        memory("b.jpg", "two", true),
        memory("c.jpg", "three", true),
    ];
    let view = DashboardView {
        memories: &memories,
        columns: 2,
        scroll: 1,
    };
    let text = draw(&view, 40, CARD_HEIGHT);
    assert!(text.contains("c.jpg"));
    assert!(!text.contains("a.jpg"));
}

#[test]
fn missing_images_are_left_out() {
    let memories = vec![memory("gone.jpg", "lost", false)];
    assert_eq!(DashboardView::row_count(&memories, 3), 0);
    let view = DashboardView {
        memories: &memories,
        columns: 3,
        scroll: 0,
    };
    let text = draw(&view, 40, 5);
    assert!(text.contains("No memories to show yet."));
    assert!(!text.contains("gone.jpg"));
}

#[test]
fn oversized_column_counts_are_bounded() {
    let memories: Vec<_> = (0..3)
        .map(|n| memory(&format!("{n}.jpg"), "", true))
        .collect();
    assert_eq!(DashboardView::row_count(&memories, usize::MAX), 1);
    let view = DashboardView {
        memories: &memories,
        columns: usize::MAX,
        scroll: 0,
    };
    let text = draw(&view, 120, CARD_HEIGHT);
    assert!(text.contains("2.jpg"));
}
