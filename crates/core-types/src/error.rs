use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unparsable date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unparsable time '{0}' (expected HH:MM:SS)")]
    InvalidTime(String),
}
