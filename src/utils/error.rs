use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Browser command failed: {0}")]
    BrowserError(#[from] fantoccini::error::CmdError),

    #[error("Browser session could not be opened: {0}")]
    BrowserSessionError(#[from] fantoccini::error::NewSessionError),

    #[error("Invalid CSS selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Degraded but acceptable outcome (e.g. empty result set).
    Low,
    /// Transient failure, rerunning may succeed.
    Medium,
    /// The task itself failed on its input.
    High,
    /// Environment or configuration problem, nothing was processed.
    Critical,
}

impl TaskError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TaskError::HttpError(_)
            | TaskError::BrowserError(_)
            | TaskError::BrowserSessionError(_) => ErrorSeverity::Medium,
            TaskError::CsvError(_)
            | TaskError::SerializationError(_)
            | TaskError::ProcessingError { .. } => ErrorSeverity::High,
            TaskError::IoError(_)
            | TaskError::SelectorError { .. }
            | TaskError::ConfigError { .. }
            | TaskError::InvalidConfigValueError { .. }
            | TaskError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TaskError::HttpError(e) => format!("Could not reach the target URL: {}", e),
            TaskError::CsvError(e) => format!("The input CSV could not be parsed: {}", e),
            TaskError::IoError(e) => format!("File operation failed: {}", e),
            TaskError::BrowserError(e) => format!("The browser action failed: {}", e),
            TaskError::BrowserSessionError(e) => {
                format!("Could not open a browser session: {}", e)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TaskError::HttpError(_) => "Check the URL and your network connection, then rerun",
            TaskError::CsvError(_) => "Check the input file for malformed rows or a missing header",
            TaskError::IoError(_) => "Check that the input exists and the output directory is writable",
            TaskError::BrowserError(_) | TaskError::BrowserSessionError(_) => {
                "Check that a WebDriver server (chromedriver/geckodriver) is running at the configured address"
            }
            TaskError::SelectorError { .. } => "Fix the CSS selector in the job config",
            TaskError::ConfigError { .. }
            | TaskError::InvalidConfigValueError { .. }
            | TaskError::MissingConfigError { .. } => "Fix the configuration value and rerun",
            TaskError::SerializationError(_) | TaskError::ProcessingError { .. } => {
                "Inspect the reported record and adjust the input data"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
