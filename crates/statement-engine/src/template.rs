//! The embedded statement layout

/// Typst source for the statement layout.
///
/// The composer's serialized blocks arrive under `sys.inputs.blocks`,
/// the per-page contact line under `sys.inputs.page_footer`. The
/// template owns the fixed page geometry (landscape A4, reference
/// margins and column widths); all strings reach it pre-formatted.
pub const STATEMENT_TEMPLATE: &str = include_str!("../templates/statement.typ");
