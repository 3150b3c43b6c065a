//! Readers for auxiliary metadata files under `.git`.
//!
//! Missing files are normal states ("no stash", "no merge", "no rebase"),
//! never errors.

use std::fs;
use std::path::Path;

/// Number of entries in the stash reflog, one per newline-terminated line.
pub fn stash_count(stash_log: &Path) -> u32 {
    match fs::read(stash_log) {
        Ok(bytes) => {
            let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
            u32::try_from(newlines).unwrap_or(u32::MAX)
        }
        Err(_) => 0,
    }
}

/// Whether a merge is in progress, i.e. `MERGE_HEAD` exists.
pub fn merge_in_progress(git_dir: &Path) -> bool {
    git_dir.join("MERGE_HEAD").is_file()
}

/// Rebase progress as `"<next>/<last>"`, if a rebase is in progress.
///
/// `git rebase` and `git am` keep their step counters in
/// `rebase-apply/next` and `rebase-apply/last`. Both files must be
/// present; unparseable contents count as 0.
pub fn rebase_progress(git_dir: &Path) -> Option<String> {
    let rebase_dir = git_dir.join("rebase-apply");
    let next_file = rebase_dir.join("next");
    let last_file = rebase_dir.join("last");

    if !next_file.is_file() || !last_file.is_file() {
        return None;
    }

    let next = read_counter(&next_file);
    let last = read_counter(&last_file);
    Some(format!("{next}/{last}"))
}

fn read_counter(path: &Path) -> u32 {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.trim().parse().ok())
        .unwrap_or(0)
}
