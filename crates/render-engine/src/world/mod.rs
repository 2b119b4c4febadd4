//! Typst `World` implementation backed entirely by in-memory state

pub mod files;
pub mod fonts;
pub mod memory;

pub use files::FileStore;
pub use fonts::FontCache;
pub use memory::RenderWorld;
