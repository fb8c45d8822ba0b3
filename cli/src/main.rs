use std::path::PathBuf;

use clap::Parser;
use memento_cli::journal;
use memento_cli::journal::JournalCommand;
use tracing_subscriber::EnvFilter;

/// Personal memory journal: pictures, their capture date and a caption.
#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Journal root; `memento.toml`, `data/` and `images/` live here.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    #[command(flatten)]
    Journal(JournalCommand),

    /// Open the interactive terminal UI.
    Tui,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = memento_memory::factory::load_config(&cli.root)?;
    match cli.subcommand {
        Subcommand::Tui => {
            let _guard = memento_tui::init_file_logging(&cli.root, &config)?;
            memento_tui::run(&cli.root, &config)
        }
        Subcommand::Journal(cmd) => {
            let env_filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .try_init();
            journal::run(&cli.root, &config, cmd)
        }
    }
}
