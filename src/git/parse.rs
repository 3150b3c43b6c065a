//! Parsing for `git status --branch --porcelain` reports.
//!
//! The first line of a report is a `## ...` branch header; every following
//! line is a two-character status code plus a path. Parsing is defensive
//! throughout: malformed or truncated lines degrade to defaults instead of
//! failing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::PromptStatus;

/// Accumulated per-entry counters for one status report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeCounts {
    pub staged: u32,
    pub conflicts: u32,
    pub changed: u32,
    pub untracked: u32,
}

impl ChangeCounts {
    /// Classify one `XY path` entry line.
    ///
    /// The four checks are independent: a single code can bump more than
    /// one counter (`MM` is both staged and changed), and the conflict
    /// combinations are counted on top of the index/worktree checks. This
    /// mirrors the literal code semantics rather than forcing mutual
    /// exclusion. Lines shorter than two characters match nothing.
    pub fn record(&mut self, line: &str) {
        let mut chars = line.chars();
        let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
            return;
        };

        if x == '?' && y == '?' {
            self.untracked += 1;
        }

        if matches!(
            (x, y),
            ('A', 'A' | 'D') | ('D', 'D' | 'U') | ('U', 'A' | 'D' | 'U')
        ) {
            self.conflicts += 1;
        }

        if matches!(x, 'A' | 'C' | 'D' | 'M' | 'R') {
            self.staged += 1;
        }
        if matches!(y, 'C' | 'D' | 'M' | 'R') {
            self.changed += 1;
        }
    }
}

/// Parse the branch header line into the branch, upstream and local fields
/// of `status`.
///
/// Three cases, in precedence order:
/// 1. detached HEAD (`## HEAD (no branch)`) - the label becomes `:` plus
///    the first seven characters of the hash stored in `head_file`; if
///    that file is unreadable the label is a bare `:`, never empty;
/// 2. unborn branch (`## No commits yet on main`, or `Initial commit` from
///    older git) - the branch is the token after the final space;
/// 3. normal (`## main...origin/main [ahead 2]`) - the branch runs from
///    offset 3 to the first `.`; a `...` separator marks a configured
///    upstream, whose name runs until a space, `[` or end of line.
pub(crate) fn parse_header(line: &str, head_file: &Path, status: &mut PromptStatus) {
    if line.contains("no branch") {
        status.local = false;
        let short: String = read_first_line(head_file)
            .map(|hash| hash.chars().take(7).collect())
            .unwrap_or_default();
        status.branch = format!(":{short}");
    } else if line.contains("Initial commit") || line.contains("No commits yet") {
        if let Some(name) = line.rsplit(' ').next() {
            status.branch = name.to_string();
        }
    } else {
        let rest = line.get(3..).unwrap_or("");
        status.branch = rest.chars().take_while(|&c| c != '.').collect();

        if let Some((_, after_dots)) = line.split_once("...") {
            status.local = false;
            status.upstream = after_dots
                .chars()
                .take_while(|&c| !matches!(c, '\n' | ' ' | '['))
                .collect();
        }
    }
}

/// Extract the decimal count following `needle` (e.g. `"ahead "`) from a
/// branch header. An absent marker, or a marker not followed by digits,
/// yields 0.
pub fn scan_count(line: &str, needle: &str) -> u32 {
    let Some(pos) = line.find(needle) else {
        return 0;
    };

    line[pos + needle.len()..]
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0u32, |value, digit| {
            value
                .saturating_mul(10)
                .saturating_add(u32::from(digit) - u32::from('0'))
        })
}

/// First line of a file, without the trailing line ending, or `None` if
/// the file cannot be read.
fn read_first_line(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::git::PromptStatus;

    fn parse(line: &str) -> PromptStatus {
        let mut status = PromptStatus::default();
        parse_header(line, Path::new("/nonexistent/HEAD"), &mut status);
        status
    }

    #[rstest]
    #[case("## main...origin/main [ahead 0]", 0)]
    #[case("## main...origin/main [ahead 1]", 1)]
    #[case("## main...origin/main [ahead 42, behind 3]", 42)]
    #[case("## main...origin/main [ahead 12345]", 12345)]
    #[case("## main...origin/main", 0)]
    #[case("## main", 0)]
    fn test_scan_count_ahead(#[case] line: &str, #[case] expected: u32) {
        assert_eq!(scan_count(line, "ahead "), expected);
    }

    #[rstest]
    #[case("## main...origin/main [behind 0]", 0)]
    #[case("## main...origin/main [behind 1]", 1)]
    #[case("## main...origin/main [ahead 2, behind 42]", 42)]
    #[case("## main...origin/main [behind 12345]", 12345)]
    #[case("## main", 0)]
    fn test_scan_count_behind(#[case] line: &str, #[case] expected: u32) {
        assert_eq!(scan_count(line, "behind "), expected);
    }

    #[test]
    fn test_scan_count_marker_without_digits() {
        assert_eq!(scan_count("## main [ahead x]", "ahead "), 0);
    }

    #[test]
    fn test_header_with_upstream_and_divergence() {
        let status = parse("## main...origin/main [ahead 2, behind 1]");

        assert_eq!(status.branch, "main");
        assert_eq!(status.upstream, "origin/main");
        assert!(!status.local);
    }

    #[test]
    fn test_header_with_upstream_no_divergence() {
        let status = parse("## feature...origin/feature");

        assert_eq!(status.branch, "feature");
        assert_eq!(status.upstream, "origin/feature");
        assert!(!status.local);
    }

    #[test]
    fn test_header_local_branch() {
        let status = parse("## feature");

        assert_eq!(status.branch, "feature");
        assert!(status.local);
        assert_eq!(status.upstream, "..");
    }

    #[test]
    fn test_header_detached_reads_head_file() {
        let tmp = TempDir::new().unwrap();
        let head = tmp.path().join("HEAD");
        fs::write(&head, "abcdef1234\n").unwrap();

        let mut status = PromptStatus::default();
        parse_header("## HEAD (no branch)", &head, &mut status);

        assert_eq!(status.branch, ":abcdef1");
        assert!(!status.local);
    }

    #[test]
    fn test_header_detached_short_head_takes_what_is_available() {
        let tmp = TempDir::new().unwrap();
        let head = tmp.path().join("HEAD");
        fs::write(&head, "abc\n").unwrap();

        let mut status = PromptStatus::default();
        parse_header("## HEAD (no branch)", &head, &mut status);

        assert_eq!(status.branch, ":abc");
    }

    #[test]
    fn test_header_detached_unreadable_head_falls_back_to_bare_label() {
        let status = parse("## HEAD (no branch)");

        assert_eq!(status.branch, ":");
        assert!(!status.local);
    }

    #[test]
    fn test_header_no_commits_yet() {
        let status = parse("## No commits yet on main");

        assert_eq!(status.branch, "main");
        assert!(status.local);
    }

    #[test]
    fn test_header_initial_commit() {
        let status = parse("## Initial commit on master");

        assert_eq!(status.branch, "master");
    }

    #[rstest]
    #[case("?? newfile.txt", 0, 0, 0, 1)]
    #[case("M  file.go", 1, 0, 0, 0)]
    #[case(" M file.go", 0, 0, 1, 0)]
    #[case("MM file.go", 1, 0, 1, 0)]
    #[case("A  added.go", 1, 0, 0, 0)]
    #[case("R  renamed.go", 1, 0, 0, 0)]
    #[case(" D deleted.go", 0, 0, 1, 0)]
    #[case("UU file.go", 0, 1, 0, 0)]
    #[case("AA both-added.go", 1, 1, 0, 0)]
    #[case("DD both-deleted.go", 1, 1, 1, 0)]
    #[case("DU deleted-by-us.go", 1, 1, 0, 0)]
    #[case("UA added-by-them.go", 0, 1, 0, 0)]
    fn test_entry_classification(
        #[case] line: &str,
        #[case] staged: u32,
        #[case] conflicts: u32,
        #[case] changed: u32,
        #[case] untracked: u32,
    ) {
        let mut counts = ChangeCounts::default();
        counts.record(line);

        assert_eq!(
            counts,
            ChangeCounts {
                staged,
                conflicts,
                changed,
                untracked
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("  ")]
    #[case(" ")]
    fn test_short_or_blank_entries_match_nothing(#[case] line: &str) {
        let mut counts = ChangeCounts::default();
        counts.record(line);

        assert_eq!(counts, ChangeCounts::default());
    }

    #[test]
    fn test_counts_accumulate_across_entries() {
        let mut counts = ChangeCounts::default();
        for line in ["M  a.go", "MM b.go", "?? c.go", "UU d.go"] {
            counts.record(line);
        }

        assert_eq!(counts.staged, 2);
        assert_eq!(counts.changed, 1);
        assert_eq!(counts.untracked, 1);
        assert_eq!(counts.conflicts, 1);
    }
}
