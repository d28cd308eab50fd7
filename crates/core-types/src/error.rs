use thiserror::Error;

/// Errors produced while validating a raw analytics request. All of these are
/// client errors: the transport surfaces the message verbatim with a 400
/// status, and none of them are worth retrying with the same input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Bad parameter: {0}")]
    InvalidRequest(String),

    #[error("Bad parameter: '{field}' must be a timestamp in YYYYMMDDHHMM format, got '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Bad parameter: 'freq' must be a positive duration such as '5m', got '{0}'")]
    InvalidFrequency(String),
}
