//! Shared plumbing for the API Gateway lambdas in this workspace:
//! the proxy request/response envelope, the closed set of handler errors,
//! tracing initialisation and a way to run a handler once against a local payload file.

pub mod envelope;
pub mod error;
pub mod local;
pub mod logging;

pub use envelope::{client_error, into_response, ok_json, parse_body, response_text};
pub use error::HandlerError;
