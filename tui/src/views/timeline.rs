use chrono::NaiveDate;
use memento_memory::types::ResolvedMemory;
use memento_memory::types::format_date;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;

/// Memories of one capture date (or all of them), newest rows last.
pub struct TimelineView<'a> {
    pub memories: &'a [ResolvedMemory],
    pub filter: Option<NaiveDate>,
    pub journal_empty: bool,
    pub scroll: u16,
}

impl WidgetRef for TimelineView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let shown = self
            .filter
            .map(format_date)
            .unwrap_or_else(|| "all dates".to_string());
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(vec![Span::raw("Filter by date: "), Span::raw(shown).bold()]),
            Line::raw("Left/Right: day   [ ]: previous/next date with memories   t: today   a: all").dim(),
            Line::raw(""),
        ];

        if self.journal_empty {
            lines.push(Line::raw("No memories saved yet."));
        } else if self.memories.is_empty() {
            lines.push(Line::raw("No memories found for that date.").yellow());
        }

        let mut hidden = 0usize;
        for memory in self.memories {
            let Some(path) = &memory.media_path else {
                hidden += 1;
                continue;
            };
            let record = &memory.record;
            lines.push(Line::from(vec![
                Span::raw(format_date(record.capture_date)).bold(),
                Span::raw(" - "),
                Span::raw(record.caption.clone()),
            ]));
            lines.push(Line::raw(format!("  {}", path.display())).dim());
            lines.push(Line::raw("---").dim());
        }
        if hidden > 0 {
            lines.push(Line::raw(format!("{hidden} hidden: image file missing")).yellow());
        }

        Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
