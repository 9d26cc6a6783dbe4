use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a scenario file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path given on the command line is not a file.
    #[error("the given input file '{}' doesn't exist", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The INI reader rejected the file.
    #[error("malformed scenario file: {0}")]
    Parse(String),

    /// A key is written without `=` or `:` and carries no value.
    #[error("section '{section}': option '{key}' has no value")]
    NoValue { section: String, key: String },

    /// A required key is absent from a scenario section.
    #[error("section '{section}': missing required key '{key}'")]
    MissingKey { section: String, key: String },

    /// A value does not parse as a float.
    #[error("section '{section}': could not convert '{value}' to float for key '{key}'")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}
