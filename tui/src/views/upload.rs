use memento_memory::upload::ALLOWED_EXTENSIONS;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use ratatui::widgets::Wrap;

use super::form_lines;
use crate::form::Form;

pub struct UploadView<'a> {
    pub form: &'a Form,
}

impl WidgetRef for UploadView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::raw(format!(
                "Choose an image ({}) and describe the moment.",
                ALLOWED_EXTENSIONS.join(", ")
            )),
            Line::raw(""),
        ];
        lines.extend(form_lines(self.form));
        lines.push(Line::raw(""));
        lines.push(Line::raw("Tab: next field   Enter: save memory   Ctrl-U: clear field").dim());
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
