//! Progress notices
//!
//! Status, warning and error notices go to stderr so that stdout carries
//! nothing but results and stays pipeable. A [`ReportingConfig`] is built
//! once per invocation and decides which notices are shown.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;

/// Which notices an invocation shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportingConfig {
    /// Hide everything except errors
    pub suppress_progress: bool,
    /// Also show detail notices (ignored when progress is suppressed)
    pub verbose: bool,
}

/// A single notice emitted during a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Status(String),
    Success(String),
    Detail(String),
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(msg) | Self::Detail(msg) => write!(f, "{}", msg),
            Self::Success(msg) => write!(f, "✓ {}", msg),
            Self::Warning(msg) => write!(f, "Warning: {}", msg),
            Self::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

enum Sink {
    Stderr,
    Memory(RefCell<Vec<Notice>>),
}

/// Emits notices according to a [`ReportingConfig`]
pub struct Reporter {
    config: ReportingConfig,
    sink: Sink,
}

impl Reporter {
    /// Creates a reporter writing to stderr
    pub fn new(config: ReportingConfig) -> Self {
        Self {
            config,
            sink: Sink::Stderr,
        }
    }

    /// Creates a reporter that records notices in memory instead of printing them
    pub fn in_memory(config: ReportingConfig) -> Self {
        Self {
            config,
            sink: Sink::Memory(RefCell::new(Vec::new())),
        }
    }

    /// Notices recorded so far; always empty for a stderr reporter
    pub fn notices(&self) -> Vec<Notice> {
        match &self.sink {
            Sink::Stderr => Vec::new(),
            Sink::Memory(log) => log.borrow().clone(),
        }
    }

    /// Progress message, hidden in quiet mode
    pub fn status(&self, message: impl Into<String>) {
        if !self.config.suppress_progress {
            self.emit(Notice::Status(message.into()));
        }
    }

    /// Completion message, hidden in quiet mode
    pub fn success(&self, message: impl Into<String>) {
        if !self.config.suppress_progress {
            self.emit(Notice::Success(message.into()));
        }
    }

    /// Extra detail, shown only in verbose mode
    pub fn detail(&self, message: impl Into<String>) {
        if !self.config.suppress_progress && self.config.verbose {
            self.emit(Notice::Detail(message.into()));
        }
    }

    /// Partial failure, hidden in quiet mode
    pub fn warn(&self, message: impl Into<String>) {
        if !self.config.suppress_progress {
            self.emit(Notice::Warning(message.into()));
        }
    }

    /// Failure message, never suppressed
    pub fn error(&self, message: impl Into<String>) {
        self.emit(Notice::Error(message.into()));
    }

    fn emit(&self, notice: Notice) {
        match &self.sink {
            Sink::Stderr => {
                // stderr is unbuffered; a failed write has nowhere else to go
                let _ = writeln!(std::io::stderr().lock(), "{}", notice);
            }
            Sink::Memory(log) => log.borrow_mut().push(notice),
        }
    }
}

/// `1 page` / `3 pages`
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
