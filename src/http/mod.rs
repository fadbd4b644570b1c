//! HTTP protocol layer module
//!
//! Response builders and request helpers, decoupled from the employee domain.

pub mod query;
pub mod response;

// Re-export commonly used items
pub use query::{parse_id, query_param};
pub use response::{
    build_404_response, build_405_response, build_empty_response, build_error_response,
    build_redirect_response, build_text_response,
};
