use memento_memory::config::clamp_grid_columns;
use memento_memory::types::ResolvedMemory;
use memento_memory::types::format_date;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use ratatui::widgets::Wrap;

/// Height of one card including its border.
pub const CARD_HEIGHT: u16 = 5;

/// Grid of memory cards, row-major in index order. Memories whose image is
/// missing are left out.
pub struct DashboardView<'a> {
    pub memories: &'a [ResolvedMemory],
    pub columns: usize,
    /// First grid row to show.
    pub scroll: usize,
}

impl DashboardView<'_> {
    pub fn row_count(memories: &[ResolvedMemory], columns: usize) -> usize {
        memories
            .iter()
            .filter(|m| m.has_media())
            .count()
            .div_ceil(clamp_grid_columns(columns))
    }
}

impl WidgetRef for DashboardView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let present: Vec<&ResolvedMemory> = self.memories.iter().filter(|m| m.has_media()).collect();
        if present.is_empty() {
            Paragraph::new("No memories to show yet.").render(area, buf);
            return;
        }

        let columns = clamp_grid_columns(self.columns);
        let visible_rows = usize::from(area.height / CARD_HEIGHT);
        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
        let col_constraints = vec![Constraint::Ratio(1, u32::try_from(columns).unwrap_or(1)); columns];

        for (row, row_area) in present.chunks(columns).skip(self.scroll).zip(row_areas.iter()) {
            let cells = Layout::horizontal(col_constraints.clone()).split(*row_area);
            for (memory, cell) in row.iter().zip(cells.iter()) {
                render_card(memory, *cell, buf);
            }
        }
    }
}

fn render_card(memory: &ResolvedMemory, area: Rect, buf: &mut Buffer) {
    let record = &memory.record;
    let block = Block::bordered().title(Line::raw(record.image.clone()).bold());
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(vec![
        Line::raw(format_date(record.capture_date)).dim(),
        Line::raw(record.caption.clone()).italic(),
    ])
    .wrap(Wrap { trim: true })
    .render(inner, buf);
}
