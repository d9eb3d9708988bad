use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ratatui::text::Text;

use crate::{
    ansi::write_text,
    config::Config,
    diff_file::ParsedDiff,
    pairing::PairingStrategy,
    parser::{extract_filename, parse_diff, split_files},
    ui::{highlight_line::Highlighter, render_ui::DiffRenderer, theme::Palette},
};

/// Width used when the terminal size cannot be queried (output piped).
pub const FALLBACK_WIDTH: usize = 120;

const PATCH_EXTENSIONS: [&str; 2] = ["diff", "patch"];

/// What the command line asked to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Unified diff text, possibly covering several files.
    Diff { raw: String, filename: Option<String> },
    /// Raw content of an untracked file.
    NewFile { content: String, filename: String },
}

/// Settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub theme: String,
    pub tab_width: usize,
    pub split: bool,
    pub pairing: PairingStrategy,
    pub width: usize,
}

impl Settings {
    pub fn from_config(config: &Config, width: usize) -> Self {
        Self {
            theme: config.theme.clone(),
            tab_width: config.tab_width,
            split: config.split_diff,
            pairing: config.pairing,
            width,
        }
    }
}

pub struct App {
    settings: Settings,
    palette: Palette,
    highlighter: Highlighter,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let palette = Palette::by_name(&settings.theme).unwrap_or_else(|| {
            log::warn!(
                "unknown theme {:?}, expected one of {:?}",
                settings.theme,
                Palette::names()
            );
            Palette::default()
        });
        let highlighter = Highlighter::new(palette.syntax_theme);

        Self {
            settings,
            palette,
            highlighter,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn renderer(&self) -> DiffRenderer<'_> {
        DiffRenderer::new(&self.highlighter, self.palette.clone())
            .with_tab_width(self.settings.tab_width)
            .with_pairing(self.settings.pairing)
    }

    pub fn render(&self, input: &Input) -> Text<'static> {
        let renderer = self.renderer();
        let Settings { width, split, .. } = self.settings;

        match input {
            Input::NewFile { content, filename } => {
                renderer.render_auto(&ParsedDiff::from_new_file(content), filename, width, split)
            }
            Input::Diff { raw, filename } => {
                let files = split_files(raw)
                    .into_iter()
                    .filter(|section| !section.path.is_empty())
                    .count();
                if files > 1 {
                    log::debug!("rendering {} files", files);
                    return renderer.render_commit(raw, width, split);
                }

                let filename = filename
                    .clone()
                    .or_else(|| detect_filename(raw))
                    .unwrap_or_default();
                renderer.render_auto(&parse_diff(raw), &filename, width, split)
            }
        }
    }

    pub fn print<W: Write>(&self, out: &mut W, input: &Input) -> Result<()> {
        let text = self.render(input);
        write_text(out, &text).context("failed to write rendered diff")
    }
}

/// Reads the whole input, from stdin when `path` is absent or `-`.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let mut bytes = Vec::new();
    match path {
        Some(path) if path != Path::new("-") => {
            bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        }
        _ => {
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read diff from stdin")?;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Filename taken from the first `diff --git` or `+++ b/` header.
pub fn detect_filename(raw: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let name = if line.starts_with("diff --git") {
            extract_filename(line)
        } else if let Some(path) = line.strip_prefix("+++ ") {
            path.trim().strip_prefix("b/").unwrap_or(path.trim()).to_string()
        } else {
            return None;
        };
        (!name.is_empty() && name != "/dev/null").then_some(name)
    })
}

pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        Ok(_) => FALLBACK_WIDTH,
        Err(err) => {
            log::debug!("terminal size unavailable ({}), using {}", err, FALLBACK_WIDTH);
            FALLBACK_WIDTH
        }
    }
}

/// Filename hint for a file given on the command line. Patch files say
/// nothing about the language of the code inside them.
pub fn path_hint(path: Option<&PathBuf>) -> Option<String> {
    let path = path.filter(|p| p.as_path() != Path::new("-"))?;
    let is_patch = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PATCH_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if is_patch {
        return None;
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
