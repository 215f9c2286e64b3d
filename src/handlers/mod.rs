//! Route handlers
//!
//! Each handler turns an [`IncomingRequest`](crate::http::request::IncomingRequest)
//! into exactly one [`Response`](crate::http::response::Response).

pub mod greeting;
pub mod static_files;

pub use greeting::greet;
pub use static_files::{StaticFiles, sanitize_path};
