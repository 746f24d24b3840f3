use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while validating input or generating a barcode.
///
/// The display text of each variant is what the command-line tools print
/// after `Error: `, so keep it user-facing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported barcode type '{name}'. Available types: {available}")]
    UnsupportedType { name: String, available: String },

    #[error("Invalid EAN-13 code: {0}")]
    InvalidEan13(&'static str),

    #[error("Invalid {role} color: {value}")]
    InvalidColor { role: &'static str, value: String },

    #[error("Invalid options format: {0}")]
    InvalidOptions(String),

    #[error("Unsupported option '{key}' for {kind}. Supported options: {supported}")]
    UnsupportedOption {
        key: String,
        kind: &'static str,
        supported: String,
    },

    #[error("Invalid value '{value}' for option '{key}': {reason}")]
    InvalidOptionValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to generate {what}: {reason}")]
    Encode { what: &'static str, reason: String },

    #[error("Unsupported output format '{0}'")]
    UnsupportedFormat(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn encode(what: &'static str, reason: impl ToString) -> Self {
        Error::Encode {
            what,
            reason: reason.to_string(),
        }
    }
}
