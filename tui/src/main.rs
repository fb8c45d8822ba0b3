use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and add to a memento journal in the terminal")]
struct Args {
    /// Journal root; relative paths in memento.toml resolve against it.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = memento_memory::factory::load_config(&args.root)?;
    let _guard = memento_tui::init_file_logging(&args.root, &config)?;
    memento_tui::run(&args.root, &config)
}
