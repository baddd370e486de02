use std::io;
use std::string::FromUtf8Error;

#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure to turn a share token back into a report.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("share token is empty")]
    Empty,
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share token is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("share token does not hold a report: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<url::ParseError> for CheckError {
    fn from(err: url::ParseError) -> Self {
        CheckError::InvalidUrl(err.to_string())
    }
}
