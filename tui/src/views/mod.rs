use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::form::Form;

pub mod dashboard;
pub mod login;
pub mod timeline;
pub mod upload;

/// One line per field; the focused field gets a marker and a cursor.
pub(crate) fn form_lines(form: &Form) -> Vec<Line<'static>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let focused = idx == form.focus;
            let mut spans = vec![
                Span::raw(if focused { "> " } else { "  " }),
                Span::raw(format!("{}: ", field.label)).bold(),
                Span::raw(field.display()),
            ];
            if focused {
                spans.push("_".slow_blink());
            }
            Line::from(spans)
        })
        .collect()
}
