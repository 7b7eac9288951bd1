//! Engine error types.
//!
//! Every variant except [`EngineError::Store`] is a recoverable domain
//! error: the caller surfaces a message and no persisted state has been
//! mutated. `Store` wraps infrastructure failures from the persistence
//! backend and is the only kind that should be treated as non-domain.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::model::EmployeeId;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("employee {employee_id} already clocked in on {date}")]
    AlreadyClockedIn {
        employee_id: EmployeeId,
        date: NaiveDate,
    },

    #[error("no active session for employee {employee_id} on {date}")]
    NoActiveSession {
        employee_id: EmployeeId,
        date: NaiveDate,
    },

    #[error("employee {employee_id} already clocked out on {date}")]
    AlreadyClockedOut {
        employee_id: EmployeeId,
        date: NaiveDate,
    },

    #[error("clock-out {clock_out} is not after clock-in {clock_in}")]
    InvalidDuration {
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    },

    #[error("work site requires geolocation but none was supplied")]
    MissingGeolocation,

    #[error("location is {distance_m:.0}m from site, outside the {radius_m:.0}m radius")]
    OutsideGeofence { distance_m: f64, radius_m: f64 },

    #[error("QR session not found")]
    SessionNotFound,

    #[error("QR session has expired")]
    SessionExpired,

    #[error("QR session is inactive")]
    SessionInactive,

    #[error("invalid attendance record: {0}")]
    InvalidRecord(String),

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
