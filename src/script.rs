//! Headless command scripts.
//!
//! A script drives a [`DrawingSession`] one command per line, the way a
//! toolbar and pointer would. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! tool circle
//! down 100 100
//! move 130 100
//! down 150 100
//! style color #ff0000
//! resize 1000 700
//! wait 250
//! save png
//! ```
//!
//! Time only advances through `wait`, so resize reloads are deterministic.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use smithkit_core::{LineStyle, Rgb, StrokeWidth};
use smithkit_designer::{DrawingSession, Key, Modifiers, ScriptedPrompt, StyleUpdate, Tool};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: export failed: {message}")]
    Export { line: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Png,
    Pdf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Down { x: f64, y: f64, shift: bool },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Key(Key),
    Style(StyleUpdate),
    /// Answer for the next text prompt
    Text(String),
    /// Cancel the next text prompt
    Cancel,
    /// Answer for the next confirmation
    Confirm(bool),
    Clear,
    Resize { width: f64, height: f64 },
    Wait(Duration),
    Save { kind: ExportKind, dir: Option<PathBuf> },
    Status,
}

fn number(word: Option<&str>, what: &str) -> Result<f64, String> {
    let word = word.ok_or_else(|| format!("missing {what}"))?;
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid {what} '{word}'"))
}

fn point(words: &mut std::str::SplitWhitespace<'_>) -> Result<(f64, f64), String> {
    Ok((number(words.next(), "x")?, number(words.next(), "y")?))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or("empty command")?.to_ascii_lowercase();

        let command = match verb.as_str() {
            "tool" => Command::Tool(words.next().ok_or("missing tool name")?.parse()?),
            "down" => {
                let (x, y) = point(&mut words)?;
                let shift = match words.next() {
                    None => false,
                    Some("shift") => true,
                    Some(other) => return Err(format!("unknown modifier '{other}'")),
                };
                Command::Down { x, y, shift }
            }
            "move" => {
                let (x, y) = point(&mut words)?;
                Command::Move { x, y }
            }
            "up" => {
                let (x, y) = point(&mut words)?;
                Command::Up { x, y }
            }
            "key" => Command::Key(Key::parse(words.next().ok_or("missing key name")?)),
            "style" => {
                let field = words.next().ok_or("missing style field")?;
                let value = words.next().ok_or("missing style value")?;
                let update = match field {
                    "width" => {
                        let width = value
                            .parse::<i64>()
                            .map_err(|_| format!("invalid width '{value}'"))?;
                        StyleUpdate::stroke_width(
                            StrokeWidth::new(width).map_err(|e| e.to_string())?,
                        )
                    }
                    "color" | "colour" => StyleUpdate::stroke_color(
                        value.parse::<Rgb>().map_err(|e| e.to_string())?,
                    ),
                    "line" => StyleUpdate::line_style(
                        value.parse::<LineStyle>().map_err(|e| e.to_string())?,
                    ),
                    other => return Err(format!("unknown style field '{other}'")),
                };
                Command::Style(update)
            }
            "text" => {
                let rest = line[verb.len()..].trim();
                Command::Text(rest.to_string())
            }
            "cancel" => Command::Cancel,
            "confirm" => match words.next() {
                Some("yes") | None => Command::Confirm(true),
                Some("no") => Command::Confirm(false),
                Some(other) => return Err(format!("confirm expects yes or no, got '{other}'")),
            },
            "clear" => Command::Clear,
            "resize" => Command::Resize {
                width: number(words.next(), "width")?,
                height: number(words.next(), "height")?,
            },
            "wait" => {
                let ms = number(words.next(), "milliseconds")?;
                Command::Wait(Duration::from_millis(ms.max(0.0) as u64))
            }
            "save" => {
                let kind = match words.next() {
                    Some("png") => ExportKind::Png,
                    Some("pdf") => ExportKind::Pdf,
                    Some(other) => return Err(format!("unknown export format '{other}'")),
                    None => return Err("missing export format".to_string()),
                };
                Command::Save {
                    kind,
                    dir: words.next().map(PathBuf::from),
                }
            }
            "status" => Command::Status,
            other => return Err(format!("unknown command '{other}'")),
        };

        Ok(command)
    }
}

/// Parse a whole script, skipping blanks and comments.
pub fn parse_script(source: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| {
            line.parse::<Command>()
                .map(|cmd| (n, cmd))
                .map_err(|message| ScriptError::Parse { line: n, message })
        })
        .collect()
}

/// Replays commands against a session on a synthetic clock.
pub struct ScriptRunner {
    session: DrawingSession<ScriptedPrompt>,
    start: Instant,
    elapsed: Duration,
    out_dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl ScriptRunner {
    pub fn new(session: DrawingSession<ScriptedPrompt>, out_dir: &Path) -> Self {
        Self {
            session,
            start: Instant::now(),
            elapsed: Duration::ZERO,
            out_dir: out_dir.to_path_buf(),
            saved: Vec::new(),
        }
    }

    pub fn session(&self) -> &DrawingSession<ScriptedPrompt> {
        &self.session
    }

    /// Files written by `save` commands so far.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    pub fn run(&mut self, commands: &[(usize, Command)]) -> Result<(), ScriptError> {
        for (line, command) in commands {
            self.execute(*line, command)?;
        }
        self.flush_reloads();
        Ok(())
    }

    /// Let any pending resize reload run.
    pub fn flush_reloads(&mut self) {
        if self.session.pending_reloads() > 0 {
            self.elapsed += self.session.config().resize.delay();
            self.session.tick(self.now());
        }
    }

    pub fn execute(&mut self, line: usize, command: &Command) -> Result<(), ScriptError> {
        tracing::debug!("line {}: {:?}", line, command);
        match command {
            Command::Tool(tool) => self.session.set_tool(*tool),
            Command::Down { x, y, shift } => {
                self.session
                    .pointer_down_with(*x, *y, Modifiers { shift: *shift });
            }
            Command::Move { x, y } => {
                self.session.pointer_move(*x, *y);
            }
            Command::Up { x, y } => {
                self.session.pointer_up(*x, *y);
            }
            Command::Key(key) => {
                self.session.key_down(key);
            }
            Command::Style(update) => {
                self.session.update_settings(*update);
            }
            Command::Text(text) => self.session.prompt_mut().push_text(text.clone()),
            Command::Cancel => self.session.prompt_mut().push_cancel(),
            Command::Confirm(answer) => self.session.prompt_mut().push_confirm(*answer),
            Command::Clear => {
                self.session.clear_all();
            }
            Command::Resize { width, height } => {
                let now = self.now();
                self.session.resize(*width, *height, now);
            }
            Command::Wait(duration) => {
                self.elapsed += *duration;
                let now = self.now();
                self.session.tick(now);
            }
            Command::Save { kind, dir } => {
                self.flush_reloads();
                let dir = dir.clone().unwrap_or_else(|| self.out_dir.clone());
                let path = match kind {
                    ExportKind::Png => {
                        self.session
                            .save_png(&dir)
                            .map_err(|e| ScriptError::Export {
                                line,
                                message: e.to_string(),
                            })?
                    }
                    ExportKind::Pdf => {
                        self.session.save_pdf(&dir).ok_or_else(|| ScriptError::Export {
                            line,
                            message: "PDF export failed".to_string(),
                        })?
                    }
                };
                self.saved.push(path);
            }
            Command::Status => tracing::info!("{}", self.session.status()),
        }
        Ok(())
    }
}
