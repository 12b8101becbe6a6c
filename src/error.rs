use std::time::Duration;

#[derive(Debug)]
pub enum Error {
    /// A required input was absent or failed validation.
    InvalidArgument(String),
    /// A page source failed or produced something unusable.
    SourceFailure(String),
    /// A single page request exceeded the configured deadline.
    Timeout(Duration),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::SourceFailure(msg) => write!(f, "page source failure: {msg}"),
            Error::Timeout(after) => {
                write!(f, "page request timed out after {}ms", after.as_millis())
            }
            Error::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidArgument(e.to_string())
    }
}
