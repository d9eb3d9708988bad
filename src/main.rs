use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use diffpane::{
    Config, PairingStrategy,
    app::{App, Input, Settings, detect_filename, path_hint, read_input, terminal_width},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Unified diff to render; reads stdin when omitted or "-"
    path: Option<PathBuf>,

    /// Side-by-side layout (inline below 120 columns)
    #[arg(short, long, conflicts_with = "unified")]
    split: bool,

    /// Inline layout, even if the config prefers split
    #[arg(short, long)]
    unified: bool,

    /// Render width in columns (default: terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// Treat the input as the content of an untracked file with this name
    #[arg(short, long, value_name = "NAME")]
    new_file: Option<String>,

    /// Filename used to pick syntax highlighting
    #[arg(short, long, value_name = "NAME")]
    filename: Option<String>,

    /// Colour palette (dark, light)
    #[arg(long)]
    theme: Option<String>,

    #[arg(long, value_name = "N")]
    tab_width: Option<usize>,

    /// How deletions line up with insertions in the split layout
    #[arg(long, value_enum)]
    pairing: Option<PairingStrategy>,

    /// Config file (default: <config dir>/diffpane/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Remember the chosen layout as the default
    #[arg(long)]
    save_split: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.as_deref());

    let mut settings = Settings::from_config(&config, args.width.unwrap_or_else(terminal_width));
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(tab_width) = args.tab_width {
        settings.tab_width = tab_width;
    }
    if let Some(pairing) = args.pairing {
        settings.pairing = pairing;
    }
    if args.split {
        settings.split = true;
    } else if args.unified {
        settings.split = false;
    }

    if args.save_split {
        config.split_diff = settings.split;
        let path = match args.config.clone() {
            Some(path) => path,
            None => Config::default_path()?,
        };
        config
            .save_to(&path)
            .with_context(|| format!("failed to save config to {}", path.display()))?;
    }

    let raw = read_input(args.path.as_deref())?;
    let filename = args
        .filename
        .or_else(|| detect_filename(&raw))
        .or_else(|| path_hint(args.path.as_ref()));
    let input = match args.new_file {
        Some(filename) => Input::NewFile {
            content: raw,
            filename,
        },
        None => Input::Diff { raw, filename },
    };

    let app = App::new(settings);
    let mut stdout = io::stdout().lock();
    app.print(&mut stdout, &input)
}
