//! External command execution with timing and debug logging.
//!
//! All command spawns go through [`run`] so that every invocation shows up
//! in `--verbose` output with its duration and exit status:
//!
//! ```text
//! $ git status --branch --porcelain
//! cmd="git status --branch --porcelain" dur=12.3ms ok=true
//! ```

use std::process::{Command, Output};
use std::time::Instant;

/// Execute a command, capturing its output, with debug logging.
pub fn run(cmd: &mut Command) -> std::io::Result<Output> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cmd_str = if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args.join(" "))
    };

    log::debug!("$ {}", cmd_str);

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(output) => {
            log::debug!(
                "cmd=\"{}\" dur={:.1}ms ok={}",
                cmd_str,
                duration_ms,
                output.status.success()
            );
        }
        Err(e) => {
            log::debug!("cmd=\"{}\" dur={:.1}ms err=\"{}\"", cmd_str, duration_ms, e);
        }
    }

    result
}
