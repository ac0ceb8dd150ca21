use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(barter_wheel::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid participant JSON in '{file}'")]
#[diagnostic(
    code(barter_wheel::json_parse_error),
    help("Expected an array of participant records or an object with a `participants` array")
)]
pub struct JsonParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("invalid JSON here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum BarterWheelError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(barter_wheel::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    JsonParseError(Box<JsonParseError>),

    #[error("Unsupported participant file '{path}'")]
    #[diagnostic(
        code(barter_wheel::unsupported_format),
        help("Participant files must end in .json or .toml")
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid glob pattern '{pattern}'")]
    #[diagnostic(code(barter_wheel::glob_error))]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Participant '{id}' appears more than once")]
    #[diagnostic(
        code(barter_wheel::duplicate_participant),
        help("Participant ids must be unique across every loaded record")
    )]
    DuplicateParticipant { id: String },

    #[error("Invalid cycle: {message}")]
    #[diagnostic(
        code(barter_wheel::invalid_cycle),
        help("A cycle is closed (first id repeated last) and has at least 3 distinct participants")
    )]
    InvalidCycle { message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(barter_wheel::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(barter_wheel::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(barter_wheel::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(barter_wheel::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_toml_parse_error_display() {
        let source_code = "participants = [";
        let toml_err = toml::from_str::<toml::Value>(source_code).unwrap_err();

        let error = TomlParseError {
            file: "traders.toml".to_string(),
            source_code: NamedSource::new("traders.toml", source_code.to_string()),
            span: Some((15, 1).into()),
            source: toml_err,
        };

        assert_eq!(error.to_string(), "Invalid TOML syntax in 'traders.toml'");
    }

    #[test]
    fn test_json_parse_error_display() {
        let source_code = "[{\"id\": }]";
        let json_err = serde_json::from_str::<serde_json::Value>(source_code).unwrap_err();

        let error = JsonParseError {
            file: "traders.json".to_string(),
            source_code: NamedSource::new("traders.json", source_code.to_string()),
            span: None,
            source: json_err,
        };

        assert_eq!(
            error.to_string(),
            "Invalid participant JSON in 'traders.json'"
        );
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = BarterWheelError::FileReadError {
            path: PathBuf::from("/tmp/missing.json"),
            source: io_err,
        };

        assert_eq!(error.to_string(), "Failed to read file '/tmp/missing.json'");
    }

    #[test]
    fn test_duplicate_participant() {
        let error = BarterWheelError::DuplicateParticipant {
            id: "agency-7".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Participant 'agency-7' appears more than once"
        );
    }

    #[test]
    fn test_invalid_cycle() {
        let error = BarterWheelError::InvalidCycle {
            message: "sequence is not closed".to_string(),
        };

        assert_eq!(error.to_string(), "Invalid cycle: sequence is not closed");
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let error = BarterWheelError::UnsupportedFormat {
            path: PathBuf::from("traders.csv"),
        };

        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let error: BarterWheelError = io_err.into();

        match error {
            BarterWheelError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: BarterWheelError = json_err.into();

        match error {
            BarterWheelError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }
}
