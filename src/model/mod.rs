use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod attendance;
pub mod classification;
pub mod employee;
pub mod qr_session;
pub mod work_site;

/// Employee identifier, unique within a company.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct EmployeeId(pub u64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct WorkSiteId(pub u64);

/// A geographic coordinate as reported by the caller's location source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported accuracy in meters, if the location source provides one.
    pub accuracy: Option<f64>,
}

/// Inclusive calendar-date range used by aggregation queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered, 0 for an inverted window.
    pub fn days(&self) -> u32 {
        let span = (self.end - self.start).num_days() + 1;
        span.max(0) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
