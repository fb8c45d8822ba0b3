use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use memento_memory::config::JournalConfig;
use memento_memory::config::clamp_grid_columns;
use memento_memory::factory;
use memento_memory::types::ResolvedMemory;
use memento_memory::types::format_date;
use memento_memory::types::parse_date;
use memento_memory::upload::Upload;

/// Journal subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum JournalCommand {
    /// Copy an image into the journal and record it.
    Save {
        /// Image file to store (jpg, jpeg or png).
        #[arg(long)]
        image: PathBuf,
        /// Capture date; defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        caption: String,
    },
    /// List memories in the order they were saved.
    List {
        /// Only memories captured on this date.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Print the resolved memories as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print memories with images as a text grid.
    Dashboard {
        /// Cards per row; defaults to the configured grid width.
        #[arg(long)]
        columns: Option<usize>,
    },
    /// Show basic statistics about the journal as JSON.
    Stats,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Execute a journal command against the journal rooted at `root`.
pub fn run(root: &Path, config: &JournalConfig, cmd: JournalCommand) -> anyhow::Result<()> {
    tracing::debug!(root = %root.display(), ?cmd, "running journal command");
    let service = factory::open_journal(root, config);
    match cmd {
        JournalCommand::Save {
            image,
            date,
            caption,
        } => {
            let upload = Upload::from_path(&image)
                .with_context(|| format!("cannot use {} as a memory", image.display()))?;
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let record = service
                .save_memory(&upload.bytes, &upload.filename, date, &caption)
                .context("failed to save memory")?;
            tracing::info!(
                image = %record.image,
                source = %image.display(),
                width = upload.width,
                height = upload.height,
                "saved memory from the command line"
            );
            println!(
                "Memory saved: {} ({}), {}",
                record.image,
                format_date(record.capture_date),
                upload.summary()
            );
        }
        JournalCommand::List { date, json } => {
            let memories = service.list_memories(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&memories)?);
            } else if memories.is_empty() {
                if date.is_some() {
                    println!("No memories found for that date.");
                } else {
                    println!("No memories saved yet.");
                }
            } else {
                for memory in &memories {
                    println!("{}", list_line(memory));
                }
            }
        }
        JournalCommand::Dashboard { columns } => {
            let memories = service.list_memories(None)?;
            let columns = columns.map_or_else(|| config.grid_columns(), clamp_grid_columns);
            print!("{}", render_grid(&memories, columns));
        }
        JournalCommand::Stats => {
            let stats = service.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn list_line(memory: &ResolvedMemory) -> String {
    let record = &memory.record;
    let mut line = format!(
        "{}  {}  {}",
        format_date(record.capture_date),
        record.image,
        record.caption
    );
    if !memory.has_media() {
        line.push_str("  (missing image)");
    }
    line
}

const CELL_WIDTH: usize = 24;

/// Cards of `columns` per row: image name, date and caption, each cut to fit.
pub fn render_grid(memories: &[ResolvedMemory], columns: usize) -> String {
    let present: Vec<&ResolvedMemory> = memories.iter().filter(|m| m.has_media()).collect();
    if present.is_empty() {
        return "No memories to show yet.\n".to_string();
    }
    let mut out = String::new();
    for row in present.chunks(clamp_grid_columns(columns)) {
        let cells: [Vec<String>; 3] = [
            row.iter().map(|m| m.record.image.clone()).collect(),
            row.iter().map(|m| format_date(m.record.capture_date)).collect(),
            row.iter().map(|m| m.record.caption.replace('\n', " ")).collect(),
        ];
        for texts in cells {
            let line = texts
                .iter()
                .map(|t| format!("{:<CELL_WIDTH$}", fit(t)))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out.push('\n');
    }
    out
}

fn fit(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}
