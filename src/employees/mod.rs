//! Employee domain module
//!
//! Holds the employee record type and the in-memory store that owns
//! the collection for the lifetime of the process.

mod model;
mod store;

pub use model::Employee;
pub use store::EmployeeStore;
