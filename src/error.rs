//! Error types for rule extraction
//!
//! Only the linguistic-analysis engine and the persistence helpers can fail;
//! the keyword classifiers and the attribute extractor are total functions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extraction pipeline
#[derive(Error, Debug)]
pub enum NluError {
    #[error("Linguistic analysis engine unavailable: {0}")]
    Engine(#[from] AnalysisError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of the linguistic-analysis engine or its language model
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Language model not found at {}", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("Failed to read language model {}: {source}", path.display())]
    ModelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse language model '{origin}': {source}")]
    ModelParse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid language model '{model}': {reason}")]
    InvalidModel { model: String, reason: String },

    #[error("Analysis failed: {message}")]
    Engine { message: String },
}

/// File read/write failures
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("No such file: '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, NluError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_wraps_analysis_error() {
        let err: NluError = AnalysisError::ModelNotFound {
            path: PathBuf::from("/nope/model.yaml"),
        }
        .into();

        assert!(matches!(err, NluError::Engine(_)));
        assert_eq!(
            err.to_string(),
            "Linguistic analysis engine unavailable: Language model not found at /nope/model.yaml"
        );
    }

    #[test]
    fn test_persistence_not_found_message() {
        let err = PersistenceError::NotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(err.to_string(), "No such file: 'missing.txt'");
    }
}
