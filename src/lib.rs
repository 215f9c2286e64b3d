//! Beacon - single-connection HTTP server
//!
//! Serves a greeting endpoint, a stock quote proxy and a static file tree,
//! one connection at a time.

pub mod config;
pub mod handlers;
pub mod http;
pub mod proxy;
pub mod routing;
pub mod server;
