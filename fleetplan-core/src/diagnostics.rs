//! Diagnostic severity handed explicitly to every collaborator call.
//!
//! The process installs its logging backend once. Collaborators do not read
//! global state to decide how chatty to be; they receive a [`Diagnostics`]
//! value alongside their inputs instead.

use log::{Level, LevelFilter};

/// Minimum severity of diagnostic output.
///
/// Only [`DiagnosticLevel::Info`] and [`DiagnosticLevel::Trace`] are reachable
/// from the command line; the remaining levels exist for library callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DiagnosticLevel {
    /// Everything, including matrices and visit sequences.
    Trace,
    /// Configuration and routing requests.
    Debug,
    /// Stage milestones.
    Info,
    /// Recoverable anomalies only.
    #[default]
    Warning,
    /// Failures only.
    Error,
    /// Unrecoverable failures only.
    Fatal,
}

impl DiagnosticLevel {
    /// Translate the severity into a `log` filter.
    ///
    /// `log` has no level above `Error`, so [`DiagnosticLevel::Fatal`] shares
    /// its filter.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_core::DiagnosticLevel;
    /// use log::LevelFilter;
    ///
    /// assert_eq!(DiagnosticLevel::Warning.level_filter(), LevelFilter::Warn);
    /// assert_eq!(DiagnosticLevel::Fatal.level_filter(), LevelFilter::Error);
    /// ```
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::Trace,
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warning => LevelFilter::Warn,
            Self::Error | Self::Fatal => LevelFilter::Error,
        }
    }
}

/// Diagnostic configuration for a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    level: DiagnosticLevel,
}

impl Diagnostics {
    /// Build a configuration emitting records at `level` and above.
    #[must_use]
    pub const fn new(level: DiagnosticLevel) -> Self {
        Self { level }
    }

    /// The configured minimum severity.
    #[must_use]
    pub const fn level(&self) -> DiagnosticLevel {
        self.level
    }

    /// The `log` filter matching [`Self::level`].
    #[must_use]
    pub const fn level_filter(&self) -> LevelFilter {
        self.level.level_filter()
    }

    /// Whether records at `level` pass the configured filter.
    ///
    /// Collaborators use this to skip expensive formatting, such as dumping
    /// a full matrix, when nobody would see the output.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level_filter()
    }
}
