//! IIIF annotation list loading.
//!
//! A canvas may reference several `sc:AnnotationList` documents (one for OCR,
//! one per annotator, ...). Their `resources` are kept as raw JSON values so a
//! single malformed record is dropped by the parser instead of failing the
//! whole list.

use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One `sc:AnnotationList` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationList {
    /// List id
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    /// Raw annotation records
    #[serde(default)]
    pub resources: Vec<Value>,
}

impl AnnotationList {
    /// Parse a list from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a list from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a list from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading annotation list {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Concatenate the records of several lists for one canvas.
    pub fn merge_records(lists: &[AnnotationList]) -> Vec<Value> {
        lists
            .iter()
            .flat_map(|list| list.resources.iter().cloned())
            .collect()
    }

    /// Number of raw records in the list.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
