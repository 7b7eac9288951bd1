//! Per-employee, per-day clock lifecycle.
//!
//! All times are caller-supplied so tests can inject fixed instants; the
//! engine never reads a wall clock.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{debug, info, warn};

use crate::classify::{HolidayCalendar, classify};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::geofence;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::work_site::WorkSite;
use crate::model::{EmployeeId, GeoPoint};
use crate::store::{AttendanceStore, StoreError};

/// Lifecycle of one attendance record for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ClockState {
    NotStarted,
    ClockedIn,
    Completed,
    AutoClosed,
}

/// Clock-in/clock-out operations over an [`AttendanceStore`].
pub struct ClockEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: AttendanceStore> ClockEngine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive the day's state from the stored record.
    pub async fn state(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<ClockState, EngineError> {
        let state = match self.store.get(employee_id, date).await? {
            None => ClockState::NotStarted,
            Some(r) if r.status == AttendanceStatus::AutoClosed => ClockState::AutoClosed,
            Some(r) if r.clock_out.is_some() => ClockState::Completed,
            Some(r) if r.clock_in.is_some() => ClockState::ClockedIn,
            Some(_) => ClockState::NotStarted,
        };
        Ok(state)
    }

    /// Record the first clock-in of the day.
    ///
    /// Duplicate prevention rides on the store's atomic conditional create:
    /// an existing record for (employee, date) surfaces as
    /// [`EngineError::AlreadyClockedIn`] even under concurrent requests.
    /// When `site` is active, a coordinate is required and must fall inside
    /// the site's geofence.
    pub async fn clock_in(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        time: NaiveTime,
        location: Option<GeoPoint>,
        site: Option<&WorkSite>,
    ) -> Result<AttendanceRecord, EngineError> {
        if let Some(site) = site.filter(|s| s.active) {
            let point = location.ok_or(EngineError::MissingGeolocation)?;
            let check = geofence::check(&point, site);
            if !check.within {
                debug!(
                    %employee_id,
                    site = %site.name,
                    distance_m = check.distance_m,
                    "clock-in outside geofence"
                );
                return Err(EngineError::OutsideGeofence {
                    distance_m: check.distance_m,
                    radius_m: site.radius_m,
                });
            }
        }

        let status = if time > self.config.late_cutoff() {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let record = AttendanceRecord {
            employee_id,
            date,
            clock_in: Some(time),
            clock_in_location: location,
            clock_out: None,
            clock_out_location: None,
            work_site_id: site.map(|s| s.id),
            status,
            classification: None,
        };
        record.validate()?;

        self.store
            .create_if_absent(&record)
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists { employee_id, date } => {
                    EngineError::AlreadyClockedIn { employee_id, date }
                }
                other => other.into(),
            })?;

        info!(%employee_id, %date, %time, %status, "clocked in");
        Ok(record)
    }

    /// Close the day's open record.
    ///
    /// The classification cache stays `None` when the day's hours cannot be
    /// classified, which includes a clock-out at the exact clock-in time;
    /// aggregation treats such records as incomplete.
    pub async fn clock_out<C: HolidayCalendar>(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        time: NaiveTime,
        location: Option<GeoPoint>,
        calendar: &C,
    ) -> Result<AttendanceRecord, EngineError> {
        let mut record = self
            .store
            .get(employee_id, date)
            .await?
            .filter(|r| r.clock_in.is_some())
            .ok_or(EngineError::NoActiveSession { employee_id, date })?;

        // A second clock-out must fail, never silently re-close.
        if record.clock_out.is_some() {
            return Err(EngineError::AlreadyClockedOut { employee_id, date });
        }

        let clock_in = record
            .clock_in
            .ok_or(EngineError::NoActiveSession { employee_id, date })?;
        if time < clock_in {
            return Err(EngineError::InvalidDuration {
                clock_in,
                clock_out: time,
            });
        }

        record.clock_out = Some(time);
        record.clock_out_location = location;
        record.classification = classify(
            date,
            record.clock_in,
            record.clock_out,
            calendar,
            self.config.standard_hours_per_day,
        )
        .ok();

        self.store.update(&record).await?;
        info!(%employee_id, %date, %time, "clocked out");
        Ok(record)
    }

    /// End-of-day sweep invoked by an external scheduler: force-close every
    /// record on `date` that was never clocked out. Returns the records it
    /// closed.
    pub async fn auto_close_day(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, EngineError> {
        let open: Vec<AttendanceRecord> = self
            .store
            .on_date(date)
            .await?
            .into_iter()
            .filter(|r| r.clock_in.is_some() && r.clock_out.is_none())
            .collect();

        let mut closed = Vec::with_capacity(open.len());
        for mut record in open {
            record.clock_out = Some(self.config.auto_close_time);
            record.status = AttendanceStatus::AutoClosed;
            self.store.update(&record).await?;
            closed.push(record);
        }

        if !closed.is_empty() {
            warn!(%date, count = closed.len(), "auto-closed open attendance records");
        }
        Ok(closed)
    }
}
