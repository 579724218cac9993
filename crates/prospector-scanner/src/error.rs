use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Token error: {0}")]
    Auth(#[from] prospector_auth::AuthError),

    #[error("API error: {0}")]
    Api(#[from] prospector_api::ApiError),

    #[error("Browser error: {0}")]
    Browser(#[from] prospector_browser::BrowserError),

    #[error("Extraction failed on {page}: {reason}")]
    Extraction { page: String, reason: String },

    #[error("Invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
