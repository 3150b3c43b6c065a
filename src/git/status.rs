//! Assembly of the final prompt record from a status report.

use std::io::BufRead;
use std::path::Path;

use super::{ChangeCounts, GitError, PromptStatus, find_git_dir, meta, parse};

impl PromptStatus {
    /// Build a record from a `git status --branch --porcelain` report.
    ///
    /// `start_dir` seeds the upward search for the `.git` directory. The
    /// reader is consumed to completion before the record is assembled;
    /// nothing is ever emitted for a partial report.
    ///
    /// An empty report and a `fatal: not a git repository` header both
    /// map to [`GitError::NotARepository`].
    pub fn from_report<R: BufRead>(report: R, start_dir: &Path) -> Result<Self, GitError> {
        let mut lines = report.lines();

        let header = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(source)) => return Err(GitError::ReportRead { source }),
            None => return Err(GitError::NotARepository),
        };

        if header.contains("fatal: not a git repository") {
            return Err(GitError::NotARepository);
        }

        let git_dir = find_git_dir(start_dir)?;

        let mut status = Self::default();
        parse::parse_header(&header, &git_dir.join("HEAD"), &mut status);
        status.ahead = parse::scan_count(&header, "ahead ");
        status.behind = parse::scan_count(&header, "behind ");

        status.stashes = meta::stash_count(&git_dir.join("logs").join("refs").join("stash"));
        status.merge = meta::merge_in_progress(&git_dir);
        if let Some(progress) = meta::rebase_progress(&git_dir) {
            status.rebase = progress;
        }

        let mut counts = ChangeCounts::default();
        for line in lines {
            // A read error mid-stream ends the report, like EOF would.
            let Ok(line) = line else { break };
            counts.record(&line);
        }
        status.staged = counts.staged;
        status.conflicts = counts.conflicts;
        status.changed = counts.changed;
        status.untracked = counts.untracked;

        Ok(status)
    }
}
