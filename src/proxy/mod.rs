//! Upstream proxying
//!
//! This module holds the stock quote proxy, the only outbound dependency of
//! the server.

pub mod upstream;

pub use upstream::QuoteProxy;
