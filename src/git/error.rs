//! Gitstat error types
//!
//! A typed enum for the few conditions the program distinguishes. Use
//! `.into()` to convert to `anyhow::Error` while preserving the type for
//! pattern matching at the top level.
//!
//! Two of the variants are benign: for a prompt, "not in a repository" is
//! an expected state, not a failure, so they are reported on stderr and
//! the process still exits 0. Only an unreadable gitfile pointer (a file
//! whose existence already proved the directory belongs to a repository)
//! and report I/O errors are real failures.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Conditions surfaced by repository discovery and status aggregation.
#[derive(Debug)]
pub enum GitError {
    /// The status report header says the directory is not under git control.
    NotARepository,

    /// The upward walk reached the filesystem root without finding `.git`.
    RootNotFound {
        /// Directory the search started from.
        start: PathBuf,
    },

    /// A `.git` gitfile pointer exists but could not be opened or read.
    IndirectionRead {
        /// Path of the gitfile.
        path: PathBuf,
        source: io::Error,
    },

    /// The status report stream could not be read.
    ReportRead { source: io::Error },
}

impl GitError {
    /// Whether this is an expected state for a prompt rather than a real
    /// failure. Benign conditions are reported on stderr but exit 0.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NotARepository | Self::RootNotFound { .. })
    }

    /// Process exit code for this condition.
    pub fn exit_code(&self) -> u8 {
        if self.is_benign() { 0 } else { 1 }
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotARepository => write!(f, "Not a git repository"),
            Self::RootNotFound { start } => {
                write!(f, "Cannot find git root above {}", start.display())
            }
            Self::IndirectionRead { path, source } => {
                write!(f, "Failed to read gitdir pointer {}: {}", path.display(), source)
            }
            Self::ReportRead { source } => {
                write!(f, "Failed to read status report: {}", source)
            }
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IndirectionRead { source, .. } | Self::ReportRead { source } => Some(source),
            _ => None,
        }
    }
}
