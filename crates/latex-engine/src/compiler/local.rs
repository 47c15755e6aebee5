//! Local `pdflatex` subprocess strategy

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::errors::{tail, AttemptFailure};

pub(crate) const STRATEGY: &str = "pdflatex";

/// How much subprocess output to keep for diagnostics.
const DIAGNOSTIC_TAIL: usize = 1000;

/// Run `pdflatex` on `tex_path`, writing into `output_dir`.
///
/// Returns the combined output tail on completion so the caller can decide
/// success by checking for the produced PDF — pdflatex exits non-zero on
/// warnings while still writing usable output. A missing binary or an
/// elapsed timeout is a hard failure that falls through to the next
/// strategy.
pub(crate) async fn run(
    tex_path: &Path,
    output_dir: &Path,
    timeout: Duration,
) -> Result<String, AttemptFailure> {
    let mut command = Command::new("pdflatex");
    command
        .arg("-interaction=nonstopmode")
        .arg("-output-directory")
        .arg(output_dir)
        .arg(tex_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // A dropped future (client disconnect) must not leave the compiler
        // running.
        .kill_on_drop(true);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AttemptFailure::new(
                STRATEGY,
                "pdflatex not installed; falling back to remote compilation",
            ));
        }
        Err(e) => {
            return Err(AttemptFailure::new(
                STRATEGY,
                format!("failed to spawn: {e}"),
            ));
        }
    };

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(AttemptFailure::new(STRATEGY, format!("wait failed: {e}")));
        }
        Err(_) => {
            return Err(AttemptFailure::new(
                STRATEGY,
                format!("timed out after {}s", timeout.as_secs()),
            ));
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    // pdflatex reports errors on stdout; stderr is usually empty.
    let diagnostic = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        stderr.into_owned()
    };
    Ok(tail(&diagnostic, DIAGNOSTIC_TAIL).to_string())
}
