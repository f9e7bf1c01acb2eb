//! newsdesk - a REST backend for topics, articles, comments and users
//!
//! Listing parameters are validated against whitelists, referenced
//! entities are checked for existence before dependent writes, and every
//! failure is classified once into a status code and a `msg` body.

pub mod cli;
pub mod http_server;
pub mod news;
pub mod observability;
pub mod rest_api;
pub mod store;
