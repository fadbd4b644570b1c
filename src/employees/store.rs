//! In-memory employee store
//!
//! Keeps records in insertion order. Lookups are linear scans that stop
//! at the first record carrying the requested id, so duplicate ids are
//! tolerated but only the earliest one is ever visible to update/delete.

use super::Employee;

/// Ordered collection of employee records
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    employees: Vec<Employee>,
}

impl EmployeeStore {
    /// Create a store holding exactly the given records
    pub const fn with_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Create a store with the three startup records
    pub fn seeded() -> Self {
        Self::with_employees(vec![
            Employee::new(1, "John Doe", "Engineer", 60000.0),
            Employee::new(2, "Jane Smith", "Manager", 75000.0),
            Employee::new(3, "Sam Brown", "Technician", 50000.0),
        ])
    }

    /// Snapshot of every record in insertion order
    pub fn list(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    pub fn get_by_id(&self, id: i32) -> Option<Employee> {
        self.employees.iter().find(|e| e.id == id).cloned()
    }

    /// Append a record. No duplicate-id check is performed.
    pub fn add(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Overwrite name, position and salary of the first record with a matching id
    ///
    /// Returns `false` when no record matches; the store is left untouched.
    pub fn update(&mut self, employee: Employee) -> bool {
        let Some(existing) = self.employees.iter_mut().find(|e| e.id == employee.id) else {
            return false;
        };
        existing.name = employee.name;
        existing.position = employee.position;
        existing.salary = employee.salary;
        true
    }

    /// Remove the first record with a matching id
    pub fn delete(&mut self, id: i32) -> bool {
        match self.employees.iter().position(|e| e.id == id) {
            Some(index) => {
                self.employees.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::seeded()
    }
}
