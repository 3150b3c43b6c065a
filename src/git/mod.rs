//! Repository discovery, status parsing and the prompt record.

use std::fmt;

// Submodules
mod error;
mod locate;
mod meta;
mod parse;
mod status;

// Re-exports from submodules
pub use error::GitError;
pub use locate::find_git_dir;
pub use meta::{merge_in_progress, rebase_progress, stash_count};
pub use parse::{ChangeCounts, scan_count};

/// Placeholder emitted in the upstream field when no upstream is configured.
pub const NO_UPSTREAM: &str = "..";

/// Placeholder emitted in the rebase field when no rebase is in progress.
pub const NO_REBASE: &str = "0";

/// One invocation's summary of the working tree, as consumed by a prompt
/// renderer.
///
/// Assembled once per run by [`PromptStatus::from_report`] and emitted via
/// `Display` as a single space-separated line:
///
/// ```text
/// <branch> <ahead> <behind> <staged> <conflicts> <changed> <untracked> <stashes> <local> <upstream> <merge> <rebase>
/// ```
///
/// Booleans render as `0`/`1`. There is no trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptStatus {
    /// Current branch, or a `:<short-hash>` label when HEAD is detached.
    pub branch: String,
    /// Commits ahead of upstream.
    pub ahead: u32,
    /// Commits behind upstream.
    pub behind: u32,
    /// Index-side changes.
    pub staged: u32,
    /// Unmerged entries.
    pub conflicts: u32,
    /// Worktree-side changes.
    pub changed: u32,
    /// Untracked entries.
    pub untracked: u32,
    /// Stash reflog entries.
    pub stashes: u32,
    /// True when the branch has no upstream (or HEAD is detached).
    pub local: bool,
    /// Upstream ref name, or [`NO_UPSTREAM`].
    pub upstream: String,
    /// Whether a merge is in progress (`MERGE_HEAD` exists).
    pub merge: bool,
    /// Rebase progress as `"<next>/<last>"`, or [`NO_REBASE`].
    pub rebase: String,
}

impl Default for PromptStatus {
    fn default() -> Self {
        Self {
            branch: String::new(),
            ahead: 0,
            behind: 0,
            staged: 0,
            conflicts: 0,
            changed: 0,
            untracked: 0,
            stashes: 0,
            local: true,
            upstream: NO_UPSTREAM.to_string(),
            merge: false,
            rebase: NO_REBASE.to_string(),
        }
    }
}

impl fmt::Display for PromptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {} {} {}",
            self.branch,
            self.ahead,
            self.behind,
            self.staged,
            self.conflicts,
            self.changed,
            self.untracked,
            self.stashes,
            u8::from(self.local),
            self.upstream,
            u8::from(self.merge),
            self.rebase
        )
    }
}
