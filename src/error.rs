use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinicfgError {
    #[error("{}", not_provided_message(.field, .file_field.as_deref()))]
    ValueNotProvided {
        field: String,
        file_field: Option<String>,
    },

    #[error(
        "Values for both {field} and {file_field} were provided, expected only one of them"
    )]
    Conflict { field: String, file_field: String },

    #[error("{}", casting_message(.field, .raw_value, .caster, .file.as_ref(), .source))]
    Casting {
        field: String,
        raw_value: String,
        caster: String,
        file: Option<FileOrigin>,
        source: CastError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config is not populated yet, call .populate() first")]
    NotPopulated,

    #[error("Field has no name, declare it in a group or create it with Field::named")]
    Unnamed,

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to extract populated config: {0}")]
    Extract(#[source] serde_json::Error),
}

/// Where a raw value came from when it was read through a `_FILE` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOrigin {
    /// Final name of the file field, e.g. `DATABASE_HOST_FILE`.
    pub field: String,
    /// Path the file field pointed at.
    pub path: PathBuf,
}

fn not_provided_message(field: &str, file_field: Option<&str>) -> String {
    match file_field {
        Some(file_field) => format!("Neither {field} nor {file_field} were provided"),
        None => format!("{field} was not provided, but was expected"),
    }
}

fn casting_message(
    field: &str,
    raw_value: &str,
    caster: &str,
    file: Option<&FileOrigin>,
    source: &CastError,
) -> String {
    match file {
        Some(origin) => format!(
            "Failed to cast {field} value \"{raw_value}\" (read from {} via {}) using {caster} caster: {source}",
            origin.path.display(),
            origin.field,
        ),
        None => format!("Failed to cast {field} value \"{raw_value}\" using {caster} caster: {source}"),
    }
}

/// Failure of a single [`Caster`](crate::Caster) conversion.
#[derive(Debug, Error)]
pub enum CastError {
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    #[error("'{0}' is not a recognized boolean")]
    Bool(String),

    #[error("failed to cast list item \"{item}\" using {caster} caster: {source}")]
    ListItem {
        item: String,
        caster: String,
        source: Box<CastError>,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl CastError {
    /// Build an error for a user-defined caster.
    pub fn custom(msg: impl std::fmt::Display) -> Self {
        CastError::Custom(msg.to_string())
    }
}
