use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("I/O error reading {path}: {error}")]
    IOError {
        path: PathBuf,
        error: std::io::Error
    },

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error("key '{0}' not found")]
    NameNotFoundError(String),

    #[error("invalid holiday '{id}': {reason}")]
    InvalidHoliday {
        id: String,
        reason: String
    },

    #[error("unresolved calendar dependencies: {0:?}")]
    UnresolvedDependency(Vec<String>)
}

impl ManagerError {
    pub fn from_json_or_json_parse_error<T>(json_value: serde_json::Value) -> Result<T, Self>
        where T: for<'a> Deserialize<'a> {
        serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
    }

    pub fn invalid_holiday(id: &str, reason: impl Into<String>) -> ManagerError {
        ManagerError::InvalidHoliday { id: id.to_owned(), reason: reason.into() }
    }

    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
    where T: for<'a> Deserialize<'a> {
    ManagerError::from_json_or_json_parse_error(json_value)
}
