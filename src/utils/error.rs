use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid input '{path}': {reason}")]
    InvalidInputError { path: String, reason: String },

    #[error("Malformed JSON in '{path}': {source}")]
    MalformedJsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid document shape: {message}")]
    InvalidShapeError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Which stage of the conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Json,
    Shape,
    Io,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::Input => 2,
            ErrorCategory::Json => 3,
            ErrorCategory::Shape => 4,
            ErrorCategory::Io => 5,
        }
    }
}

impl ConvertError {
    pub fn invalid_input(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvertError::InvalidInputError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_shape(message: impl Into<String>) -> Self {
        ConvertError::InvalidShapeError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::InvalidInputError { .. } => ErrorCategory::Input,
            ConvertError::MalformedJsonError { .. } => ErrorCategory::Json,
            ConvertError::InvalidShapeError { .. } => ErrorCategory::Shape,
            ConvertError::IoError(_) | ConvertError::CsvError(_) => ErrorCategory::Io,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::InvalidInputError { path, reason } => {
                format!("Cannot use input file '{}': {}", path, reason)
            }
            ConvertError::MalformedJsonError { path, source } => format!(
                "'{}' is not valid JSON (line {}, column {})",
                path,
                source.line(),
                source.column()
            ),
            ConvertError::InvalidShapeError { message } => {
                format!("Unsupported JSON document: {}", message)
            }
            ConvertError::IoError(e) => format!("File system error: {}", e),
            ConvertError::CsvError(e) => format!("Failed to render CSV: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Pass the path of an existing JSON file",
            ErrorCategory::Json => "Fix the JSON syntax at the reported position",
            ErrorCategory::Shape => {
                "The document root must be a non-empty array of objects, e.g. [{\"a\": 1}]"
            }
            ErrorCategory::Io => "Check permissions and free space of the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
