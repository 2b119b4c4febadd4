//! Virtual file store for in-memory compilation
//!
//! Typst resolves everything it reads (the main source, images) through
//! `FileId`s. This store maps those ids to bytes so a compile never touches
//! the real filesystem.

use std::collections::HashMap;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

use crate::error::RenderError;

/// Files for one compilation, keyed by Typst `FileId`
#[derive(Debug, Default)]
pub struct FileStore {
    files: HashMap<FileId, Bytes>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the main source file at `/main.typ`
    pub fn mount_main(&mut self, content: &str) -> FileId {
        let id = file_id("/main.typ");
        self.files.insert(id, content.as_bytes().into());
        id
    }

    /// Mount a binary asset (e.g. an image) under the given virtual path
    pub fn mount(&mut self, path: &str, content: Bytes) -> Result<FileId, RenderError> {
        let normalized = normalize_path(path)?;
        let id = file_id(&normalized);
        self.files.insert(id, content);
        Ok(id)
    }

    /// Retrieve a file as source text; the content must be valid UTF-8
    pub fn source(&self, id: FileId) -> Option<Source> {
        let bytes = self.files.get(&id)?;
        let text = std::str::from_utf8(bytes).ok()?;
        Some(Source::new(id, text.to_string()))
    }

    /// Retrieve a file as raw bytes
    pub fn bytes(&self, id: FileId) -> Option<Bytes> {
        self.files.get(&id).cloned()
    }
}

/// `FileId`s are interned by path, so equal paths yield equal ids.
fn file_id(path: &str) -> FileId {
    FileId::new(None, VirtualPath::new(path))
}

/// Enforce a leading slash, collapse double slashes, reject traversal.
fn normalize_path(path: &str) -> Result<String, RenderError> {
    if path.contains("..") {
        return Err(RenderError::AssetPath(
            path.to_string(),
            "path traversal with '..' is not allowed".to_string(),
        ));
    }

    let mut normalized = path.to_string();
    if !normalized.starts_with('/') {
        normalized = format!("/{}", normalized);
    }
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }

    Ok(normalized)
}
