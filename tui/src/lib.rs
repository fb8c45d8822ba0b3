//! Terminal front end for the memento journal: login gate, upload form,
//! date-filtered timeline and grid dashboard.

use std::path::Path;

use crossterm::event::Event;
use memento_memory::config::JournalConfig;
use memento_memory::factory;

pub mod app;
pub mod form;
pub mod session;
mod terminal;
pub mod views;

use app::App;
use app::Control;

/// Name of the log file written next to the memory table.
pub const LOG_FILE: &str = "memento-tui.log";

/// Route `tracing` output to a file so it does not draw over the UI.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_file_logging(
    root: &Path,
    config: &JournalConfig,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let index_path = config.index_path(root);
    let log_dir = index_path.parent().unwrap_or(root);
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}

/// Open the journal under `root` and run the UI until the user quits.
pub fn run(root: &Path, config: &JournalConfig) -> anyhow::Result<()> {
    let service = factory::open_journal(root, config);
    if config.credentials.is_none() {
        tracing::warn!("no credentials configured; the login gate is open");
    }
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(
        service,
        config.credentials.clone(),
        config.grid_columns(),
        today,
    );

    let mut term = terminal::init()?;
    loop {
        term.draw(|frame| app.render(frame))?;
        let control = match crossterm::event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => {
                app.handle_paste(&text);
                Control::Continue
            }
            _ => Control::Continue,
        };
        if control == Control::Quit {
            break;
        }
    }
    Ok(())
}
