pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("PlantUML encoding error: {message}")]
    Encoding { message: String },

    #[error("Precondition violated: {message}")]
    Precondition { message: &'static str },

    #[error("Unsupported image format: {value:?} (expected png|svg)")]
    UnsupportedFormat { value: String },

    #[error("Unknown value {value:?} for option `{option}` (expected {expected})")]
    UnknownOptionValue {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Option `{option}` must be {expected}")]
    InvalidOptionType {
        option: &'static str,
        expected: &'static str,
    },

    #[error("Option `{option}` is {value}, but the minimum is {min}")]
    OptionOutOfRange {
        option: &'static str,
        value: i64,
        min: i64,
    },

    #[error("Invalid options document: {message}")]
    InvalidConfig { message: String },
}
