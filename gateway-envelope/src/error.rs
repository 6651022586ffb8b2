use thiserror::Error;

/// Everything a handler can fail with. The variants are mutually exclusive and never retried.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request body does not parse into the expected shape.
    /// Returned to the caller as a 404 response carrying this message.
    #[error("{0}")]
    InputShape(String),

    /// The embedded payload is not valid base64. Raised to the runtime.
    #[error("file was not encoded properly")]
    TransportDecoding(#[source] base64::DecodeError),

    /// The result could not be serialized. Raised to the runtime.
    #[error("failure in encoding json")]
    OutputEncoding(#[source] serde_json::Error),
}

impl HandlerError {
    /// Client errors are answered with a response, the rest are reported to the runtime.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InputShape(_))
    }
}
