//! LaTeX worksheet rendering engine
//!
//! This crate turns sanitized worksheet body markup into printable PDFs:
//! - Template injection: embedded page templates with collision-free slot
//!   splicing for topic, author line and body
//! - Compilation: local `pdflatex` subprocess first, then remote compilation
//!   services, short-circuiting on the first strategy that produces a PDF
//! - Answer key: when the body carries a trailing answers page, a separate
//!   key document is rendered and compiled alongside the primary file

pub mod compiler;
pub mod templates;

pub use compiler::{CompiledWorksheet, CompilerConfig, EngineError, LatexCompiler};
pub use templates::{render, Layout};

/// Render a worksheet body into full document source and compile it, plus an
/// answer-key PDF when the body carries a trailing answers page.
///
/// A key-compilation failure is logged and dropped; the primary PDF result
/// stands on its own.
pub async fn compile_worksheet(
    compiler: &LatexCompiler,
    body: &str,
    topic: &str,
    teacher_name: &str,
    layout: Layout,
    output_id: &str,
) -> Result<CompiledWorksheet, EngineError> {
    let source = templates::render(body, topic, teacher_name, layout);
    let pdf_file = compiler.compile(&source, output_id).await?;

    let keys_file = match templates::answer_key_body(body) {
        Some(key_body) => {
            let key_source =
                templates::render(&key_body, topic, teacher_name, Layout::OneColumn);
            let key_id = format!("{output_id}_keys");
            match compiler.compile(&key_source, &key_id).await {
                Ok(file) => Some(file),
                Err(err) => {
                    tracing::warn!("answer key compilation failed for {output_id}: {err}");
                    None
                }
            }
        }
        None => None,
    };

    Ok(CompiledWorksheet { pdf_file, keys_file })
}
