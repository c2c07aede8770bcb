//! Report export collaborators: clipboard and file output.
//!
//! Both are traits so the UI can swap in recording fakes under test.
//! Failures are returned to the caller, which reports them to the user;
//! tracker state is never touched by an export.

use std::io::Write;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::tracker::SessionTracker;

/// Byte-order mark prepended to text exports for locale-sensitive viewers.
pub const UTF8_BOM: &str = "\u{feff}";
pub const TEXT_MIME: &str = "text/plain;charset=utf-8";

/// Destination for copied text.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Destination for saved files.
pub trait FileSink {
    /// Persist `content` under `filename`; returns where it was written.
    fn save(&mut self, filename: &str, content: &str, mime: &str) -> Result<PathBuf>;
}

// ============================================
// Clipboard
// ============================================

/// Copies through the terminal with an OSC 52 escape sequence.
///
/// Works over SSH and inside tmux (with `set-clipboard on`); terminals that
/// ignore OSC 52 silently drop the payload.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", payload)
            .and_then(|_| self.out.flush())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

// ============================================
// Files
// ============================================

/// Writes exports into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectoryExporter {
    fn save(&mut self, filename: &str, content: &str, mime: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);

        let mut bytes = Vec::with_capacity(content.len() + UTF8_BOM.len());
        if mime.starts_with("text/") {
            bytes.extend_from_slice(UTF8_BOM.as_bytes());
        }
        bytes.extend_from_slice(content.as_bytes());
        std::fs::write(&path, bytes)?;

        tracing::info!(path = %path.display(), mime = %mime, "Report exported");
        Ok(path)
    }
}

// ============================================
// Report helpers
// ============================================

/// Copy the tracker's current report to the clipboard.
pub fn copy_report(tracker: &SessionTracker, clipboard: &mut dyn ClipboardSink) -> Result<()> {
    let report = tracker.generate_report();
    clipboard.write_text(&report).inspect_err(|e| {
        tracing::warn!(error = %e, "Failed to copy report to clipboard");
    })
}

/// Save the tracker's current report as a text file.
pub fn save_report(tracker: &SessionTracker, sink: &mut dyn FileSink) -> Result<PathBuf> {
    let report = tracker.generate_report();
    let filename = tracker.report_filename();
    sink.save(&filename, &report, TEXT_MIME).inspect_err(|e| {
        tracing::warn!(error = %e, filename = %filename, "Failed to save report");
    })
}
