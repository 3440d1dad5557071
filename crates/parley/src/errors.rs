use thiserror::Error;

/// Failures crossing the HTTP boundary. These never propagate past the
/// session: they are rendered into the conversation as error turns.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Server error: {0}")]
    Server(u16),

    #[error("Request failed: {status} - {body}")]
    Request { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;
