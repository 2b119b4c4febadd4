//! The `World` given to the Typst compiler
//!
//! Bundles the virtual file store, the global font cache, and a standard
//! library whose `sys.inputs` carries the caller's data, converted from
//! JSON values.

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::files::FileStore;
use super::fonts::{global_font_cache, FontCache};
use crate::error::RenderError;

/// Everything one compilation needs: sources, assets, fonts, inputs
pub struct RenderWorld {
    files: FileStore,
    main: FileId,
    fonts: &'static FontCache,
    library: LazyHash<Library>,
    now: chrono::DateTime<Utc>,
}

impl RenderWorld {
    pub fn new(
        source: &str,
        inputs: &HashMap<String, serde_json::Value>,
        assets: &HashMap<String, Vec<u8>>,
    ) -> Result<Self, RenderError> {
        let mut files = FileStore::new();
        let main = files.mount_main(source);

        for (path, content) in assets {
            files.mount(path, Bytes::from(content.clone()))?;
        }

        let library = Library::builder()
            .with_inputs(convert_inputs(inputs)?)
            .build();

        Ok(Self {
            files,
            main,
            fonts: global_font_cache(),
            library: LazyHash::new(library),
            now: Utc::now(),
        })
    }

    /// The mounted main source, for diagnostic span resolution
    pub fn main_source(&self) -> Option<Source> {
        self.files.source(self.main)
    }
}

impl World for RenderWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.fonts.book()
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        self.files
            .source(id)
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.files
            .bytes(id)
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let offset_hours = offset.unwrap_or(0);
        let adjusted = self.now + chrono::Duration::hours(offset_hours);

        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

/// Convert the caller's JSON map into the `sys.inputs` dictionary
fn convert_inputs(inputs: &HashMap<String, serde_json::Value>) -> Result<Dict, RenderError> {
    let mut dict = Dict::new();
    for (key, value) in inputs {
        dict.insert(key.as_str().into(), json_to_value(value)?);
    }
    Ok(dict)
}

fn json_to_value(json: &serde_json::Value) -> Result<Value, RenderError> {
    match json {
        serde_json::Value::Null => Ok(Value::None),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(RenderError::InvalidInput(format!(
                    "unrepresentable number: {}",
                    n
                )))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s.as_str().into())),
        serde_json::Value::Array(items) => {
            let values: Vec<Value> = items
                .iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(Array::from(values.as_slice())))
        }
        serde_json::Value::Object(entries) => {
            let mut nested = Dict::new();
            for (key, value) in entries {
                nested.insert(key.as_str().into(), json_to_value(value)?);
            }
            Ok(Value::Dict(nested))
        }
    }
}
