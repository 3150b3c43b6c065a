//! Upward search for the repository's `.git` metadata directory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::GitError;

/// Find the `.git` metadata directory governing `start`, walking parents.
///
/// At each ancestor the `.git` entry is probed: a directory is the
/// metadata root itself; a regular file is a gitfile pointer (linked
/// worktrees) and is resolved via [`resolve_gitfile`]. The filesystem
/// root itself is never probed.
///
/// A gitfile that exists but cannot be read is fatal rather than skipped:
/// its presence already proved the directory belongs to a repository.
pub fn find_git_dir(start: &Path) -> Result<PathBuf, GitError> {
    let mut dir = start.to_path_buf();

    loop {
        let Some(parent) = dir.parent().map(Path::to_path_buf) else {
            return Err(GitError::RootNotFound {
                start: start.to_path_buf(),
            });
        };

        let candidate = dir.join(".git");
        if candidate.is_dir() {
            log::debug!("git dir: {}", candidate.display());
            return Ok(candidate);
        }
        if candidate.is_file() {
            return resolve_gitfile(&candidate);
        }

        dir = parent;
    }
}

/// Resolve a `gitdir: <path>` pointer file to the real metadata directory.
///
/// The first line is taken, everything up to and including the first colon
/// is dropped, spaces after the colon are skipped, and the path runs until
/// a space, `\r`, `\n` or end of line.
fn resolve_gitfile(gitfile: &Path) -> Result<PathBuf, GitError> {
    let indirection_err = |source| GitError::IndirectionRead {
        path: gitfile.to_path_buf(),
        source,
    };

    let file = File::open(gitfile).map_err(indirection_err)?;
    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(indirection_err)?;

    let after_colon = match first_line.split_once(':') {
        Some((_, rest)) => rest,
        None => "",
    };
    let target: String = after_colon
        .trim_start_matches(' ')
        .chars()
        .take_while(|c| !matches!(c, ' ' | '\r' | '\n'))
        .collect();

    log::debug!("gitfile {} -> {}", gitfile.display(), target);
    Ok(PathBuf::from(target))
}
