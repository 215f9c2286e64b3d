//! HTTP protocol implementation.
//!
//! This module implements the one-request-per-connection HTTP/1.1 layer.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: Drives one accepted connection through the request-response state machine
//! - **`parser`**: Parses the request line into an `IncomingRequest`
//! - **`request`**: Request representation (method, decoded path, query arguments)
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-type detection for static files
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read lines until the buffer runs dry
//!        └──────┬──────┘
//!               │ Request line parsed (or not)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, or 400 without a request line
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Closed (always, Connection: close)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use beacon::http::connection::Connection;
//! use beacon::routing::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = Router::from_config(&Default::default())?;
//!     let listener = TcpListener::bind("127.0.0.1:35000").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, &router);
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
