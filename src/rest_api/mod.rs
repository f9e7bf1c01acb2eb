//! # REST API
//!
//! HTTP surface for the news service: request parsing, handlers, response
//! envelopes and the error dispatcher.

pub mod endpoints;
pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ErrorKind, ErrorResponse, RestError, RestResult};
pub use handler::AppState;
pub use parser::{EmptyBodyPolicy, Payload};
pub use server::api_router;
