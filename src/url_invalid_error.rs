use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("The supplied URL is not a Google Sheets document: {url}")]
pub struct UrlInvalidError {
    pub url: String,
}
