//! Royalty statement generation
//!
//! Turns a table of royalty rows into one PDF statement per copyright
//! owner:
//! - ingest a CSV table with lenient numeric parsing
//! - partition rows by owner, preserving first-appearance order
//! - compose a block-structured document per owner (amounts formatted
//!   in the European convention)
//! - render each document through `render-engine` and write it into a
//!   threshold-based directory bucket

pub mod compose;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod group;
pub mod ingest;
pub mod model;
pub mod options;
pub mod template;

pub use dispatch::{generate_statements, WrittenStatement};
pub use error::StatementError;
pub use model::{OwnerGroup, RoyaltyRecord};
pub use options::StatementOptions;
