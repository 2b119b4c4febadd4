//! In-memory Typst rendering
//!
//! This crate compiles Typst source to PDF without touching the real
//! filesystem: the source and any binary assets live in a virtual file
//! store, fonts come embedded via `typst-assets`, and template data is
//! passed through `sys.inputs`.

pub mod compile;
pub mod error;
pub mod world;

pub use compile::{render_pdf, RenderRequest, RenderedPdf};
pub use error::{CompileIssue, RenderError};
