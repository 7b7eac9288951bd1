use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::EngineError;
use crate::model::classification::Classification;
use crate::model::{EmployeeId, GeoPoint, WorkSiteId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    AutoClosed,
}

/// One attendance record per (employee, calendar date).
///
/// Created on the first clock-in of the day, mutated once on clock-out.
/// The auto-close sweep may force-close it at end of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_in_location: Option<GeoPoint>,
    pub clock_out: Option<NaiveTime>,
    pub clock_out_location: Option<GeoPoint>,
    pub work_site_id: Option<WorkSiteId>,
    pub status: AttendanceStatus,
    /// Cached pay-bucket split, filled on clock-out. Recomputed on demand
    /// by aggregation; never authoritative.
    pub classification: Option<Classification>,
}

impl AttendanceRecord {
    /// A record marking the employee absent for the day.
    pub fn absent(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            clock_in: None,
            clock_in_location: None,
            clock_out: None,
            clock_out_location: None,
            work_site_id: None,
            status: AttendanceStatus::Absent,
            classification: None,
        }
    }

    /// Boundary validation: rejects malformed records instead of letting
    /// them reach computation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.clock_in.is_none() && self.clock_out.is_some() {
            return Err(EngineError::InvalidRecord(
                "clock-out without clock-in".into(),
            ));
        }
        if let (Some(start), Some(end)) = (self.clock_in, self.clock_out) {
            if end < start {
                return Err(EngineError::InvalidDuration {
                    clock_in: start,
                    clock_out: end,
                });
            }
        }
        Ok(())
    }
}
