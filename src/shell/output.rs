//! Terminal output
//!
//! The `Writer` serializes text to the terminal. While a write is in progress
//! the session's input-suppression flag is raised so a line delivered during
//! the write is discarded instead of being handled reentrantly.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Where the writer sends its bytes.
pub enum Sink {
    Stdout,
    Buffer(Vec<u8>),
}

/// Rendering class of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Error,
    Status,
}

/// Raises the suppression flag for its lifetime.
struct Suppressed<'a>(&'a AtomicBool);

impl<'a> Suppressed<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for Suppressed<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct Writer {
    sink: Sink,
    suppressed: Arc<AtomicBool>,
    colors: bool,
}

impl Writer {
    /// Writer for the interactive terminal. Styling is dropped when stdout
    /// is redirected.
    pub fn stdout(suppressed: Arc<AtomicBool>, colors: bool) -> Self {
        Self {
            sink: Sink::Stdout,
            suppressed,
            colors: colors && io::stdout().is_terminal(),
        }
    }

    /// Writer collecting everything into memory, without styling
    pub fn buffered(suppressed: Arc<AtomicBool>) -> Self {
        Self {
            sink: Sink::Buffer(Vec::new()),
            suppressed,
            colors: false,
        }
    }

    pub fn plain(&mut self, text: &str) -> io::Result<()> {
        self.line(Style::Plain, text)
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        self.line(Style::Error, text)
    }

    pub fn status(&mut self, text: &str) -> io::Result<()> {
        self.line(Style::Status, text)
    }

    /// Writes `text` followed by a newline in the given style.
    pub fn line(&mut self, style: Style, text: &str) -> io::Result<()> {
        let color = match style {
            Style::Plain => None,
            Style::Error => Some(RED),
            Style::Status => Some(CYAN),
        };

        let rendered = match color {
            Some(code) if self.colors => format!("{code}{text}{RESET}\n"),
            _ => format!("{text}\n"),
        };
        self.raw(rendered.as_bytes())
    }

    /// Writes bytes verbatim, e.g. file content or the prompt.
    pub fn raw(&mut self, data: &[u8]) -> io::Result<()> {
        let _guard = Suppressed::raise(&self.suppressed);
        match &mut self.sink {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(data)?;
                stdout.flush()
            }
            Sink::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    /// Drains a buffered writer's content as text.
    pub fn take_captured(&mut self) -> String {
        match &mut self.sink {
            Sink::Stdout => String::new(),
            Sink::Buffer(buf) => String::from_utf8_lossy(&std::mem::take(buf)).into_owned(),
        }
    }
}

/// Renders rows as an aligned table with a leading `(index)` column.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = std::iter::once("(index)".len())
        .chain(headers.iter().map(|h| h.chars().count()))
        .collect();

    for (index, row) in rows.iter().enumerate() {
        widths[0] = widths[0].max(index.to_string().len());
        for (col, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(col + 1) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let border = widths
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("┼");

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header: Vec<&str> = std::iter::once("(index)").chain(headers.iter().copied()).collect();
    lines.push(render_row(&header, &widths));
    lines.push(border);
    for (index, row) in rows.iter().enumerate() {
        let index = index.to_string();
        let cells: Vec<&str> = std::iter::once(index.as_str())
            .chain(row.iter().map(String::as_str))
            .collect();
        lines.push(render_row(&cells, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {cell:<width$} "))
        .collect::<Vec<_>>()
        .join("│")
}
