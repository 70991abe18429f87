use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("Document encoding error: {0}")]
    DocumentError(#[from] bson::ser::Error),

    #[error("Invalid identifier: {0}")]
    InvalidIdError(#[from] bson::oid::Error),

    #[error("Input file not found: {path}")]
    InputNotFoundError { path: String },

    #[error("Unsupported input format '{extension}' for {path}")]
    UnsupportedFormatError { path: String, extension: String },

    #[error("Worksheet '{sheet}' not found")]
    SheetNotFoundError { sheet: String },

    #[error("Workbook {path} has no worksheets")]
    EmptyWorkbookError { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Duplicate key in {collection}: {key}")]
    DuplicateKeyError { collection: String, key: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Configuration,
    Database,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_)
            | Self::SpreadsheetError(_)
            | Self::CsvError(_)
            | Self::InputNotFoundError { .. }
            | Self::UnsupportedFormatError { .. }
            | Self::SheetNotFoundError { .. }
            | Self::EmptyWorkbookError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::DatabaseError(_) | Self::DocumentError(_) | Self::DuplicateKeyError { .. } => {
                ErrorCategory::Database
            }
            Self::InvalidIdError(_) | Self::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Database => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Validation => ErrorSeverity::Low,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputNotFoundError { .. } => {
                "Check the --input path or the [import] input setting"
            }
            Self::UnsupportedFormatError { .. } => "Use an .xlsx, .xls, .ods or .csv file",
            Self::SheetNotFoundError { .. } | Self::EmptyWorkbookError { .. } => {
                "Check the worksheet name with --sheet or open the workbook to verify its sheets"
            }
            Self::MissingConfigError { .. } => {
                "Set MONGODB_URI in the environment or in .env.local"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file and CLI flags",
            Self::DatabaseError(_) => "Verify the database is reachable and the URI is correct",
            Self::DuplicateKeyError { .. } => "Remove the duplicate row from the source spreadsheet",
            Self::SerializationError(_) => {
                "Re-run sauna-import to regenerate the JSON fixtures"
            }
            Self::InvalidIdError(_) => "Sauna ids are 24-character hex strings",
            Self::IoError(_) => "Check file permissions and that the directory exists",
            _ => "Check the input data and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputNotFoundError { path } => format!("Cannot find the spreadsheet at {}", path),
            Self::MissingConfigError { field } => {
                format!("Required setting {} is not defined", field)
            }
            Self::DatabaseError(e) => format!("Database operation failed: {}", e),
            Self::DuplicateKeyError { collection, key } => {
                format!("A record with key {} already exists in {}", key, collection)
            }
            other => other.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
