use crate::svg::SvgError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Download failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Download of {url} returned HTTP {status}")]
    DownloadStatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("SVG error: {0}")]
    SvgError(#[from] SvgError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid symbol: {message}")]
    InvalidSymbolError { message: String },

    #[error("Packing error in {file}: {message}")]
    PackError { file: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    FileSystem,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序退出碼；任何失敗都不會回傳 0
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::DownloadStatusError { .. } => ErrorCategory::Network,
            EtlError::IoError(_) => ErrorCategory::FileSystem,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::SerializationError(_)
            | EtlError::SvgError(_)
            | EtlError::InvalidSymbolError { .. }
            | EtlError::PackError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 下載失敗可重跑
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) | EtlError::DownloadStatusError { .. } => {
                "Check the network connection and rerun; already downloaded files are kept"
            }
            EtlError::IoError(_) => "Check that the configured directories exist and are writable",
            EtlError::SerializationError(_) | EtlError::InvalidSymbolError { .. } => {
                "Regenerate the symbols file; every record needs a non-empty reference"
            }
            EtlError::SvgError(_) => "Inspect the raw SVG file; it is not well-formed markup",
            EtlError::PackError { .. } => {
                "Rerun with --force-process to regenerate the processed SVG files"
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and retry"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download icon data: {}", self),
            ErrorCategory::FileSystem => format!("File system problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Could not process icon data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
