//! Git working-tree status for shell prompts.
//!
//! The library turns a `git status --branch --porcelain` report plus a few
//! files under `.git` into a single [`git::PromptStatus`] record. The
//! `gitstat` binary prints that record as one space-separated line for a
//! prompt renderer to consume.

pub mod git;
pub mod shell_exec;
