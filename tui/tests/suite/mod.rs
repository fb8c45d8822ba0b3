// Integration test modules, built into the single `all` test binary.
mod app;
mod dashboard;
mod timeline;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Text content of the test backend, one line per row.
pub(crate) fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
