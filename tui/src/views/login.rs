use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;

use super::form_lines;
use crate::form::Form;

pub struct LoginView<'a> {
    pub form: &'a Form,
    pub error: Option<&'a str>,
}

impl WidgetRef for LoginView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::raw("Sign in to open the journal."), Line::raw("")];
        lines.extend(form_lines(self.form));
        lines.push(Line::raw(""));
        lines.push(Line::raw("Enter: next field / log in   Esc: quit").dim());
        if let Some(err) = self.error {
            lines.push(Line::raw(""));
            lines.push(Line::raw(err.to_string()).red());
        }
        Paragraph::new(lines).render(area, buf);
    }
}
