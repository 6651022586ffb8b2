//! Tallies browser families in access logs uploaded through API Gateway.
//!
//! The request body carries a file name and the base64 encoded log. Each log line is space-delimited
//! with the user agent starting at the 12th field.

pub mod classifier;
pub mod config;
pub mod handler;
pub mod parser;
