//! Journey export entries
//!
//! A Journey export is a directory of JSON files, one per entry, with the
//! entry's photos stored next to them.

use crate::error::{ImportError, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry as written by Journey's JSON export. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JourneyEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub date_journal: Option<f64>,
    /// Entry body in Journey markup.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Photo file names, relative to the export directory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
}

impl JourneyEntry {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ImportError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Every `*.json` file below `dir`, sorted by path.
pub fn entry_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for item in WalkDir::new(dir).follow_links(true) {
        let item = item.map_err(|source| ImportError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if item.file_type().is_file() && is_json(item.path()) {
            paths.push(item.into_path());
        }
    }
    paths.sort();
    log::debug!("found {} entries under {}", paths.len(), dir.display());
    Ok(paths)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
