use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::debug;

use super::EmployeeStore;
use crate::errors::StoreResult;
use crate::models::employee::{Employee, EmployeeFields};

#[derive(Debug, Default)]
struct Directory {
    employees: Vec<Employee>,
    next_id: u64,
}

/// Volatile store for demos and tests. Everything is lost on restart.
///
/// Ids count up from `"0"`. They match the number of records until the first
/// delete, after which the counter keeps going so no id is handed out twice.
#[derive(Debug, Default)]
pub struct MemoryStore {
    directory: Mutex<Directory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Directory> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.lock().employees.clone())
    }

    async fn load_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self
            .lock()
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .cloned())
    }

    async fn add_employee(&self, fields: &EmployeeFields) -> StoreResult<String> {
        let mut directory = self.lock();
        let id = directory.next_id.to_string();
        directory.next_id += 1;
        directory.employees.push(Employee::new(id.clone(), fields.clone()));
        Ok(id)
    }

    /// Unknown ids are ignored, unlike the database backends.
    async fn update_employee(&self, employee_id: &str, fields: &EmployeeFields) -> StoreResult<()> {
        match self.lock().employees.iter_mut().find(|e| e.id == employee_id) {
            Some(employee) => employee.apply(fields.clone()),
            None => debug!("Ignoring update of unknown employee '{}'", employee_id),
        }
        Ok(())
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<()> {
        self.lock().employees.retain(|e| e.id != employee_id);
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
