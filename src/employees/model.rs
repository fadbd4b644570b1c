// Employee record type

use serde::{Deserialize, Serialize};

/// A single employee record
///
/// Identifiers are assigned by the caller, never generated by the store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub salary: f64,
}

impl Employee {
    pub fn new(id: i32, name: &str, position: &str, salary: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            position: position.to_string(),
            salary,
        }
    }

    /// Line shown in the employee listing
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.name, self.position)
    }

    /// Multi-line detail view used by the lookup endpoint
    pub fn detail(&self) -> String {
        format!(
            "Name: {}\r\nPosition: {}\r\nSalary: {}\r\n",
            self.name, self.position, self.salary
        )
    }
}
