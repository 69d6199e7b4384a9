use crate::error;
use crate::ulimits::Ulimits;
use crate::value::decode_ulimits;
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reads the `ulimits` key out of one or more build target documents.
///
/// Documents are YAML (JSON is accepted as well), later documents override
/// limits set by earlier ones.
#[derive(Debug)]
pub struct Loader<'a> {
    pub sources: Vec<&'a str>,
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Could not read {}: {}", .path.display(), .source)]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not load yaml data from source #{index}: {source}")]
    InvalidYaml {
        index: usize,
        source: serde_yaml::Error,
    },
    #[error("Source #{index} is not a mapping")]
    InvalidDocument { index: usize },
    #[error("Invalid ulimits in source #{index}: {source}")]
    InvalidUlimits { index: usize, source: error::Error },
}

impl<'a> Loader<'a> {
    pub fn new(sources: Vec<&'a str>) -> Self {
        Self { sources }
    }

    /// Decodes and merges the ulimits of every source, in order.
    pub fn fetch_ulimits(&self) -> Result<Ulimits, LoaderError> {
        let mut ulimits = Ulimits::new();

        for (index, source) in self.sources.iter().enumerate() {
            let document: serde_json::Value = match serde_yaml::from_str(source) {
                Ok(document) => document,
                Err(source) => return Err(LoaderError::InvalidYaml { index, source }),
            };

            let value = match &document {
                serde_json::Value::Null => continue,
                serde_json::Value::Object(entries) => match entries.get("ulimits") {
                    None | Some(serde_json::Value::Null) => continue,
                    Some(value) => value,
                },
                _ => return Err(LoaderError::InvalidDocument { index }),
            };

            let overlay = decode_ulimits(value)
                .map_err(|source| LoaderError::InvalidUlimits { index, source })?;
            debug!("Source #{} sets {} ulimit(s)", index, overlay.len());
            ulimits = ulimits.merge(&overlay);
        }

        Ok(ulimits)
    }
}

/// Reads every file into memory, keeping the given order.
pub fn read_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>, LoaderError> {
    paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path).map_err(|source| LoaderError::UnreadableFile {
                path: path.as_ref().to_path_buf(),
                source,
            })
        })
        .collect()
}
