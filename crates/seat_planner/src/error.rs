use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeatPlanError>;

#[derive(Debug, Error)]
pub enum SeatPlanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("Invalid CSV row {row}: {message}")]
    CsvRow { row: usize, message: String },

    #[error("Invalid roster: {message}")]
    RosterError { message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SeatPlanError {
    fn from(err: toml::de::Error) -> Self {
        SeatPlanError::Config(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_maps_to_config() {
        let err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let converted: SeatPlanError = err.into();
        assert!(matches!(converted, SeatPlanError::Config(_)));
        assert!(converted.to_string().starts_with("Configuration error: TOML parse error"));
    }

    #[test]
    fn test_duplicate_id_message() {
        let err = SeatPlanError::DuplicateId { kind: "seat", id: 7 };
        assert_eq!(err.to_string(), "Duplicate seat id: 7");
    }
}
