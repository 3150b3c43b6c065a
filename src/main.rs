use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::{Command, ExitCode};

use anyhow::Context;
use clap::Parser;

use gitstat::git::{GitError, PromptStatus};
use gitstat::shell_exec;

/// Summarize `git status` as a single line for shell prompts.
///
/// Reads a `git status --branch --porcelain` report from stdin when stdin
/// is piped, otherwise runs git itself.
#[derive(Parser)]
#[command(name = "gitstat", version)]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', value_name = "PATH")]
    directory: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(status) => {
            print!("{status}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            match err.downcast_ref::<GitError>() {
                Some(git_err) => ExitCode::from(git_err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<PromptStatus> {
    let start_dir = match &cli.directory {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", dir.display()))?,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let report = read_report()?;
    let status = PromptStatus::from_report(report.as_bytes(), &start_dir)?;
    Ok(status)
}

/// Obtain the status report text: piped stdin if available, otherwise the
/// output of running git directly.
fn read_report() -> anyhow::Result<String> {
    let mut stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .context("Failed to read status report from stdin")?;
        return Ok(text);
    }

    let output = shell_exec::run(Command::new("git").args(["status", "--branch", "--porcelain"]))
        .context("Failed to run git status")?;

    // git reports "fatal: not a git repository" on stderr; fold it into
    // the stream the parser sees, as a shell's `2>&1` would.
    let stream = if output.status.success() {
        output.stdout
    } else {
        output.stderr
    };
    Ok(String::from_utf8_lossy(&stream).into_owned())
}
