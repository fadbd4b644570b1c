//! Request handler module
//!
//! Responsible for request routing dispatch and the employee endpoints.

mod employees;
mod inspect;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
