//! Request routing

pub mod router;

pub use router::{Route, Router, match_route};
