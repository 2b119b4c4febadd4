//! Compilation and PDF export

use std::collections::HashMap;

use typst::diag::{Severity, SourceDiagnostic};
use typst::syntax::Source;

use crate::error::{CompileIssue, RenderError};
use crate::world::RenderWorld;

/// A document to render: Typst source, values surfaced as `sys.inputs`,
/// and binary assets addressed by virtual path.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub source: String,
    pub inputs: HashMap<String, serde_json::Value>,
    pub assets: HashMap<String, Vec<u8>>,
}

/// A finished PDF
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Compile the request and export the result as a PDF.
///
/// Warning diagnostics are logged; any error diagnostic fails the render.
pub fn render_pdf(request: &RenderRequest) -> Result<RenderedPdf, RenderError> {
    let world = RenderWorld::new(&request.source, &request.inputs, &request.assets)?;

    let warned = typst::compile(&world);
    let main = world.main_source();

    let (_, warnings) = split_diagnostics(&warned.warnings, main.as_ref());
    log_warnings(&warnings);

    let document = match warned.output {
        Ok(document) => document,
        Err(diagnostics) => {
            let (errors, warnings) = split_diagnostics(&diagnostics, main.as_ref());
            log_warnings(&warnings);

            if errors.is_empty() {
                return Err(RenderError::Compile(vec![CompileIssue::new(
                    "compilation failed without diagnostics",
                )]));
            }
            return Err(RenderError::Compile(errors));
        }
    };

    let bytes = typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
        .map_err(|e| RenderError::Export(format!("{:?}", e)))?;

    Ok(RenderedPdf {
        bytes,
        pages: document.pages.len(),
    })
}

fn log_warnings(warnings: &[CompileIssue]) {
    for warning in warnings {
        tracing::warn!("Typst: {}", warning);
    }
}

/// Split diagnostics into errors and warnings, resolving locations for
/// spans that fall inside the main source.
fn split_diagnostics(
    diagnostics: &[SourceDiagnostic],
    main: Option<&Source>,
) -> (Vec<CompileIssue>, Vec<CompileIssue>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut issue = CompileIssue::new(diag.message.to_string());

        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            issue = issue.with_hint(hint);
        }

        if let Some(source) = main {
            if diag.span.id() == Some(source.id()) {
                if let Some(range) = source.range(diag.span) {
                    if let (Some(line), Some(column)) = (
                        source.byte_to_line(range.start),
                        source.byte_to_column(range.start),
                    ) {
                        issue = issue.with_location(line + 1, column + 1);
                    }
                }
            }
        }

        match diag.severity {
            Severity::Error => errors.push(issue),
            Severity::Warning => warnings.push(issue),
        }
    }

    (errors, warnings)
}
