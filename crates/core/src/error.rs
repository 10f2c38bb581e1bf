use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet parse error: {0}")]
    SpreadsheetParse(String),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction service returned {status}: {details}")]
    Service { status: String, details: String },

    #[error("malformed extraction reply: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("extraction reply carried no choices")]
    EmptyReply,

    #[error("missing credential: {0}")]
    MissingCredential(String),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
