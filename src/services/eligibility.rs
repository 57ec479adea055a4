use std::collections::HashSet;

use crate::models::{Employee, Prize, Winner};

/// Employees who have not yet won `prize`.
///
/// Order follows `employees`; a duplicated id is kept only once.
/// Without a prize there is nothing to draw for, so the pool is empty.
pub fn eligible(employees: &[Employee], winners: &[Winner], prize: Option<&Prize>) -> Vec<Employee> {
    let Some(prize) = prize else {
        return Vec::new();
    };

    let mut seen: HashSet<&str> = winners
        .iter()
        .filter(|w| w.prize.id == prize.id)
        .map(|w| w.employee.id.as_str())
        .collect();

    employees
        .iter()
        .filter(|e| seen.insert(e.id.as_str()))
        .cloned()
        .collect()
}
