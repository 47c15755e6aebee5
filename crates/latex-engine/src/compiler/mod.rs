//! Compilation engine: ordered fallback chain over compilation strategies
//!
//! Each invocation writes one uniquely named `.tex` source file, then walks
//! an ordered list of strategies — local `pdflatex`, then one or more remote
//! services — and short-circuits on the first one that yields the expected
//! PDF. Exhaustion returns every attempt's diagnostic.

pub mod errors;
mod local;
mod remote;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

pub use errors::{AttemptFailure, EngineError};

/// A compiled worksheet: the primary PDF plus an optional answer-key PDF,
/// both as file names under the output directory.
#[derive(Debug, Clone)]
pub struct CompiledWorksheet {
    pub pdf_file: String,
    pub keys_file: Option<String>,
}

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    LocalPdflatex,
    LatexOnline,
    YtoTech,
}

/// The ordered strategy list for a deployment.
///
/// Deployments without a TeX toolchain skip the local step entirely; the
/// remote services are always attempted in the same order.
pub fn strategy_order(prefer_local: bool) -> Vec<Strategy> {
    if prefer_local {
        vec![
            Strategy::LocalPdflatex,
            Strategy::LatexOnline,
            Strategy::YtoTech,
        ]
    } else {
        vec![Strategy::LatexOnline, Strategy::YtoTech]
    }
}

/// Compilation engine configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Shared directory for `.tex` sources and `.pdf` outputs.
    pub output_dir: PathBuf,
    /// Try the local toolchain before the remote services.
    pub prefer_local: bool,
    /// Wall-clock limit for the local subprocess.
    pub local_timeout: Duration,
    /// Per-request limit for each remote service.
    pub remote_timeout: Duration,
    /// Base URL of the latexonline.cc-compatible service.
    pub latexonline_url: String,
    /// Base URL of the latex.ytotech.com-compatible service.
    pub ytotech_url: String,
}

impl CompilerConfig {
    pub fn new(output_dir: impl Into<PathBuf>, prefer_local: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefer_local,
            local_timeout: Duration::from_secs(60),
            remote_timeout: Duration::from_secs(120),
            latexonline_url: "https://latexonline.cc".to_string(),
            ytotech_url: "https://latex.ytotech.com".to_string(),
        }
    }
}

/// The compilation engine. Cheap to clone per request is not needed; one
/// instance lives in the application state.
pub struct LatexCompiler {
    config: CompilerConfig,
    http: reqwest::Client,
}

impl LatexCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile document source to `<output_id>.pdf` under the output
    /// directory, returning the PDF file name.
    ///
    /// The caller supplies a globally unique `output_id`, so concurrent
    /// invocations never touch each other's files. On exhaustion every
    /// attempted strategy's diagnostic is returned and any partial output
    /// file is removed; the `.tex` source is kept for debugging.
    pub async fn compile(&self, source: &str, output_id: &str) -> Result<String, EngineError> {
        let tex_filename = format!("{output_id}.tex");
        let pdf_filename = format!("{output_id}.pdf");
        let tex_path = self.config.output_dir.join(&tex_filename);
        let pdf_path = self.config.output_dir.join(&pdf_filename);

        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        tokio::fs::write(&tex_path, source).await?;

        let mut failures = Vec::new();
        for strategy in strategy_order(self.config.prefer_local) {
            debug!("compiling {output_id} via {strategy:?}");
            match strategy {
                Strategy::LocalPdflatex => {
                    match local::run(&tex_path, &self.config.output_dir, self.config.local_timeout)
                        .await
                    {
                        // Success is the PDF existing, regardless of exit
                        // status: pdflatex exits non-zero on warnings while
                        // still producing usable output.
                        Ok(_) if pdf_path.exists() => {
                            info!("compiled {pdf_filename} with local pdflatex");
                            return Ok(pdf_filename);
                        }
                        Ok(diagnostic) => {
                            failures.push(AttemptFailure::new(
                                local::STRATEGY,
                                format!("no PDF produced: {diagnostic}"),
                            ));
                        }
                        Err(failure) => {
                            warn!("local compilation unavailable: {failure}");
                            failures.push(failure);
                        }
                    }
                }
                Strategy::LatexOnline => {
                    match remote::latexonline(
                        &self.http,
                        &self.config.latexonline_url,
                        source,
                        &tex_filename,
                        self.config.remote_timeout,
                    )
                    .await
                    {
                        Ok(bytes) => {
                            tokio::fs::write(&pdf_path, bytes).await?;
                            info!("compiled {pdf_filename} with {}", remote::LATEXONLINE);
                            return Ok(pdf_filename);
                        }
                        Err(failure) => {
                            warn!("remote compilation failed: {failure}");
                            failures.push(failure);
                        }
                    }
                }
                Strategy::YtoTech => {
                    match remote::ytotech(
                        &self.http,
                        &self.config.ytotech_url,
                        source,
                        self.config.remote_timeout,
                    )
                    .await
                    {
                        Ok(bytes) => {
                            tokio::fs::write(&pdf_path, bytes).await?;
                            info!("compiled {pdf_filename} with {}", remote::YTOTECH);
                            return Ok(pdf_filename);
                        }
                        Err(failure) => {
                            warn!("remote compilation failed: {failure}");
                            failures.push(failure);
                        }
                    }
                }
            }
        }

        // No strategy produced the file; drop any stale partial output.
        let _ = tokio::fs::remove_file(&pdf_path).await;
        Err(EngineError::Exhausted(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_first_when_preferred() {
        assert_eq!(
            strategy_order(true),
            vec![
                Strategy::LocalPdflatex,
                Strategy::LatexOnline,
                Strategy::YtoTech
            ]
        );
    }

    #[test]
    fn remote_only_when_local_disabled() {
        assert_eq!(
            strategy_order(false),
            vec![Strategy::LatexOnline, Strategy::YtoTech]
        );
    }

    /// Unreachable remote endpoints: the engine must attempt every strategy
    /// in order and report all of them in the exhaustion error, having
    /// written the source file.
    #[tokio::test]
    async fn exhaustion_reports_every_remote_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CompilerConfig::new(dir.path(), false);
        // Nothing listens here; both attempts fail fast.
        config.latexonline_url = "http://127.0.0.1:9".to_string();
        config.ytotech_url = "http://127.0.0.1:9".to_string();
        let compiler = LatexCompiler::new(config);

        let err = compiler
            .compile("\\documentclass{article}\\begin{document}x\\end{document}", "worksheet_test")
            .await
            .expect_err("no strategy can succeed");

        match err {
            EngineError::Exhausted(failures) => {
                assert_eq!(failures.len(), 2);
                assert_eq!(failures[0].strategy, "latexonline.cc");
                assert_eq!(failures[1].strategy, "latex.ytotech.com");
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }

        assert!(dir.path().join("worksheet_test.tex").exists());
        assert!(!dir.path().join("worksheet_test.pdf").exists());
    }

    /// Distinct output ids never interfere, even within one directory.
    #[tokio::test]
    async fn concurrent_ids_use_disjoint_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CompilerConfig::new(dir.path(), false);
        config.latexonline_url = "http://127.0.0.1:9".to_string();
        config.ytotech_url = "http://127.0.0.1:9".to_string();
        let compiler = LatexCompiler::new(config);

        let (a, b) = tokio::join!(
            compiler.compile("A", "worksheet_a"),
            compiler.compile("B", "worksheet_b"),
        );
        assert!(a.is_err() && b.is_err());

        let a_src = std::fs::read_to_string(dir.path().join("worksheet_a.tex")).unwrap();
        let b_src = std::fs::read_to_string(dir.path().join("worksheet_b.tex")).unwrap();
        assert_eq!(a_src, "A");
        assert_eq!(b_src, "B");
    }
}
