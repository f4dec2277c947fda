//! Status line output.

use std::{
    fmt,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, AtomicU8, Ordering},
    },
};

/// Tracing target every status line is written to.
pub const DISPLAY_TARGET: &str = "synclog::display";

/// Severity of a status line, and the display verbosity threshold.
///
/// A line is shown when its level is not [`DisplayLevel::Silence`] and does
/// not exceed the current verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[repr(u8)]
pub enum DisplayLevel {
    /// Nothing is shown.
    #[display("silence")]
    Silence = 0,
    /// Errors only.
    #[display("error")]
    Error = 1,
    /// Warnings and errors.
    #[display("warn")]
    Warn = 2,
    /// Regular status output.
    #[default]
    #[display("info")]
    Info = 3,
    /// Core internals.
    #[display("core")]
    Core = 4,
    /// Everything.
    #[display("debug")]
    Debug = 5,
}

impl DisplayLevel {
    /// Highest verbosity accepted on the command line.
    pub const MAX: u8 = 5;

    /// Level for a numeric verbosity, saturating at [`DisplayLevel::Debug`].
    pub const fn from_u8(level: u8) -> Self {
        match level {
            0 => Self::Silence,
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            4 => Self::Core,
            _ => Self::Debug,
        }
    }
}

/// Destination of rendered status lines.
pub trait StatusSink: Send + Sync + fmt::Debug {
    /// Write one rendered line.
    fn write_line(&self, level: DisplayLevel, line: &str);
}

/// Writes status lines as tracing events under [`DISPLAY_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn write_line(&self, level: DisplayLevel, line: &str) {
        match level {
            DisplayLevel::Silence => {}
            DisplayLevel::Error => tracing::error!(target: DISPLAY_TARGET, "{line}"),
            DisplayLevel::Warn => tracing::warn!(target: DISPLAY_TARGET, "{line}"),
            DisplayLevel::Info => tracing::info!(target: DISPLAY_TARGET, "{line}"),
            DisplayLevel::Core | DisplayLevel::Debug => {
                tracing::debug!(target: DISPLAY_TARGET, "{line}")
            }
        }
    }
}

/// Collects status lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(DisplayLevel, String)>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, line)| line).collect()
    }

    /// Lines written so far, with their level.
    pub fn entries(&self) -> Vec<(DisplayLevel, String)> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Forget every collected line.
    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl StatusSink for MemorySink {
    fn write_line(&self, level: DisplayLevel, line: &str) {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).push((level, line.to_string()));
    }
}

/// Switch for log output on the terminal.
///
/// The tracing writer consults the gate on every event, so whatever takes
/// over the terminal can close it and open it again on the way out. Clones
/// share the switch.
#[derive(Debug, Clone, Default)]
pub struct OutputGate {
    closed: Arc<AtomicBool>,
}

impl OutputGate {
    /// Stop writing log output.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Resume writing log output.
    pub fn open(&self) {
        self.closed.store(false, Ordering::SeqCst);
    }

    /// Whether log output is written.
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }
}

/// Level-gated handle to a [`StatusSink`].
///
/// Clones share the sink and the verbosity, so lowering the verbosity from one
/// clone silences all of them. The printer also carries the [`OutputGate`] of
/// the terminal its sink ends up on.
#[derive(Debug, Clone)]
pub struct StatusPrinter {
    sink: Arc<dyn StatusSink>,
    verbosity: Arc<AtomicU8>,
    gate: OutputGate,
}

impl Default for StatusPrinter {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink), DisplayLevel::default())
    }
}

impl StatusPrinter {
    /// Creates a printer writing to `sink` at `verbosity`.
    pub fn new(sink: Arc<dyn StatusSink>, verbosity: DisplayLevel) -> Self {
        Self {
            sink,
            verbosity: Arc::new(AtomicU8::new(verbosity as u8)),
            gate: OutputGate::default(),
        }
    }

    /// Share `gate` with the printer.
    pub fn with_gate(mut self, gate: OutputGate) -> Self {
        self.gate = gate;
        self
    }

    /// The terminal output gate.
    pub const fn gate(&self) -> &OutputGate {
        &self.gate
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> DisplayLevel {
        DisplayLevel::from_u8(self.verbosity.load(Ordering::SeqCst))
    }

    /// Replace the verbosity, returning the previous one.
    pub fn set_verbosity(&self, verbosity: DisplayLevel) -> DisplayLevel {
        DisplayLevel::from_u8(self.verbosity.swap(verbosity as u8, Ordering::SeqCst))
    }

    /// Whether a line at `level` would be written.
    pub fn enabled(&self, level: DisplayLevel) -> bool {
        level != DisplayLevel::Silence && level <= self.verbosity()
    }

    /// Write `line` at `level` if enabled. Returns whether it was written.
    pub fn print(&self, level: DisplayLevel, line: &str) -> bool {
        if !self.enabled(level) {
            return false;
        }
        self.sink.write_line(level, line);
        true
    }

    /// Write `line` at [`DisplayLevel::Warn`].
    pub fn warn(&self, line: &str) -> bool {
        self.print(DisplayLevel::Warn, line)
    }

    /// Write `line` at [`DisplayLevel::Info`].
    pub fn info(&self, line: &str) -> bool {
        self.print(DisplayLevel::Info, line)
    }

    /// Write `line` at [`DisplayLevel::Error`].
    pub fn error(&self, line: &str) -> bool {
        self.print(DisplayLevel::Error, line)
    }
}
