//! Routing module
//!
//! Explicit route table for the employee service:
//! - Exact and segment-prefix path matching
//! - Per-route method and required query parameter
//! - 405 detection for known paths hit with an unsupported method

mod table;

pub use table::{match_route, Endpoint, RouteMatch, ROUTES};
