//! The `AttendanceStore` trait and the in-memory reference backend.
//!
//! The engine performs at most one or two record writes per operation and
//! delegates duplicate-clock-in prevention to the backend: `create_if_absent`
//! must be atomic on the (employee, date) key, because a real deployment is
//! multi-instance and cannot rely on in-process locking.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::attendance::AttendanceRecord;
use crate::model::{DateWindow, EmployeeId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists for employee {employee_id} on {date}")]
    AlreadyExists {
        employee_id: EmployeeId,
        date: NaiveDate,
    },

    #[error("no record for employee {employee_id} on {date}")]
    NotFound {
        employee_id: EmployeeId,
        date: NaiveDate,
    },

    #[error("storage backend failure")]
    Backend(#[from] anyhow::Error),
}

/// Abstraction over the attendance record store.
///
/// All methods return `Send` futures so the trait can back multi-threaded
/// async embedders; the engine itself never spawns tasks.
pub trait AttendanceStore: Send + Sync {
    /// Atomic conditional create keyed by (employee, date). Fails with
    /// [`StoreError::AlreadyExists`] when a record for the day exists.
    fn create_if_absent(
        &self,
        record: &AttendanceRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn get(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<AttendanceRecord>, StoreError>> + Send;

    /// Replace the stored record for (employee, date). Fails with
    /// [`StoreError::NotFound`] when none exists.
    fn update(
        &self,
        record: &AttendanceRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Records for one employee within a window, most recent first.
    fn for_employee(
        &self,
        employee_id: EmployeeId,
        window: DateWindow,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, StoreError>> + Send;

    /// All records on one date (company scope).
    fn on_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, StoreError>> + Send;
}

/// Mutex-guarded map backend for tests and single-process embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(EmployeeId, NaiveDate), AttendanceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<(EmployeeId, NaiveDate), AttendanceRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AttendanceStore for MemoryStore {
    fn create_if_absent(
        &self,
        record: &AttendanceRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let key = (record.employee_id, record.date);
        let result = {
            let mut records = self.lock();
            if records.contains_key(&key) {
                Err(StoreError::AlreadyExists {
                    employee_id: record.employee_id,
                    date: record.date,
                })
            } else {
                records.insert(key, record.clone());
                Ok(())
            }
        };
        async move { result }
    }

    fn get(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<AttendanceRecord>, StoreError>> + Send {
        let found = self.lock().get(&(employee_id, date)).cloned();
        async move { Ok(found) }
    }

    fn update(
        &self,
        record: &AttendanceRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let key = (record.employee_id, record.date);
        let result = {
            let mut records = self.lock();
            if let Some(existing) = records.get_mut(&key) {
                *existing = record.clone();
                Ok(())
            } else {
                Err(StoreError::NotFound {
                    employee_id: record.employee_id,
                    date: record.date,
                })
            }
        };
        async move { result }
    }

    fn for_employee(
        &self,
        employee_id: EmployeeId,
        window: DateWindow,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, StoreError>> + Send {
        let mut rows: Vec<AttendanceRecord> = if window.days() == 0 {
            Vec::new()
        } else {
            self.lock()
                .range((employee_id, window.start)..=(employee_id, window.end))
                .map(|(_, r)| r.clone())
                .collect()
        };
        rows.reverse(); // most recent first
        async move { Ok(rows) }
    }

    fn on_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, StoreError>> + Send {
        let rows: Vec<AttendanceRecord> = self
            .lock()
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        async move { Ok(rows) }
    }
}
