use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Holiday id -> display name for one locale.
pub type NameDictionary = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum NameSourceError {
    #[error("no holiday names for locale '{0}'")]
    NotFound(String),

    #[error("I/O error reading {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error
    },

    #[error("malformed holiday names in {path}: {error}")]
    Json {
        path: PathBuf,
        error: serde_json::Error
    }
}

/// Where per-locale holiday names come from.
pub trait NameDataSource: Send + Sync {
    fn load(&self, locale: &str) -> Result<NameDictionary, NameSourceError>;
}

/// Reads `<folder>/<locale>.json`, a flat object of id -> name.
pub struct JsonNameSource {
    folder: PathBuf
}

impl JsonNameSource {
    pub fn new(folder: impl Into<PathBuf>) -> JsonNameSource {
        JsonNameSource { folder: folder.into() }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn is_plain_locale(locale: &str) -> bool {
        !locale.is_empty()
            && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl NameDataSource for JsonNameSource {
    fn load(&self, locale: &str) -> Result<NameDictionary, NameSourceError> {
        // never let a locale walk out of the folder
        if !JsonNameSource::is_plain_locale(locale) {
            return Err(NameSourceError::NotFound(locale.to_owned()));
        }

        let path = self.folder.join(format!("{}.json", locale));
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(NameSourceError::NotFound(locale.to_owned()));
            },
            Err(error) => return Err(NameSourceError::Io { path, error })
        };
        serde_json::from_reader(BufReader::new(file))
            .map_err(|error| NameSourceError::Json { path, error })
    }
}

/// In-memory name tables.
#[derive(Default)]
pub struct MemoryNameSource {
    tables: HashMap<String, NameDictionary>
}

impl MemoryNameSource {
    pub fn new() -> MemoryNameSource {
        MemoryNameSource::default()
    }

    pub fn with_locale<I, K, V>(mut self, locale: &str, names: I) -> MemoryNameSource
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<String> {
        let dictionary = names.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.tables.insert(locale.to_owned(), dictionary);
        self
    }
}

impl NameDataSource for MemoryNameSource {
    fn load(&self, locale: &str) -> Result<NameDictionary, NameSourceError> {
        self.tables.get(locale)
            .cloned()
            .ok_or_else(|| NameSourceError::NotFound(locale.to_owned()))
    }
}
