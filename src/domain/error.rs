use std::io;

use thiserror::Error;

/// Library-wide error type for labsetup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A configured setup root does not exist.
    #[error("Setup path not found: {0}")]
    SetupPathMissing(String),

    /// Setup name is invalid.
    #[error("Invalid setup name '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidSetupName(String),

    /// Device name is invalid.
    #[error("Invalid device name '{0}': must be an identifier (letters, digits, underscores)")]
    InvalidDeviceName(String),

    /// Requested setup, or the target of an include, is unknown.
    #[error("{}", not_found_message(.name, .included_by.as_deref(), .available))]
    SetupNotFound { name: String, included_by: Option<String>, available: String },

    /// Setup exists but its file could not be read or parsed.
    #[error("Setup '{name}' exists, but could not be read: {reason}")]
    UnreadableSetup { name: String, reason: String },

    /// The include graph contains a cycle.
    #[error("Cyclic include detected: {0}")]
    CyclicInclude(String),

    /// Two setups that exclude each other would be loaded together.
    #[error("Cannot load setup '{setup}' together with setup '{other}': {reason}")]
    Conflict { setup: String, other: String, reason: String },

    /// A device declaration is missing its type or violates its class schema.
    #[error("Malformed declaration of device '{device}' in setup '{setup}': {reason}")]
    MalformedDeclaration { setup: String, device: String, reason: String },

    /// Special setups need an explicit opt-in.
    #[error("Cannot load special setup '{0}'")]
    SpecialSetup(String),

    /// Data-only setups are never loaded.
    #[error("Cannot load data-only setup '{0}'")]
    DataOnlySetup(String),

    /// Merged system configuration is inconsistent.
    #[error("Invalid sysconfig: {0}")]
    InvalidSysconfig(String),

    /// Template interpolation failed.
    #[error("Interpolation failed in {what}: {details}")]
    Template { what: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

fn not_found_message(name: &str, included_by: Option<&str>, available: &str) -> String {
    match included_by {
        Some(parent) => format!("Setup '{parent}' includes setup '{name}' which does not exist"),
        None if available.is_empty() => format!("Setup '{name}' does not exist"),
        None => format!("Setup '{name}' does not exist. Available: {available}"),
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers that only care about the category.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidSetupName(_)
            | AppError::InvalidDeviceName(_)
            | AppError::UnreadableSetup { .. }
            | AppError::CyclicInclude(_)
            | AppError::MalformedDeclaration { .. }
            | AppError::SpecialSetup(_)
            | AppError::DataOnlySetup(_)
            | AppError::InvalidSysconfig(_)
            | AppError::Template { .. }
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::SetupPathMissing(_) | AppError::SetupNotFound { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::Conflict { .. } => io::ErrorKind::AlreadyExists,
        }
    }
}
