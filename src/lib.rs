//! Attendance and payroll computation engine.
//!
//! Turns raw clock-in/clock-out events (with optional geolocation and
//! work-site context) into validated daily attendance records, classifies
//! worked time into pay buckets, and aggregates history into statistics,
//! payroll estimates and behavioral insights.
//!
//! The engine is request-scoped and stateless: every operation takes its
//! time and location inputs as parameters, runs synchronously, and touches
//! at most one or two records through the [`store::AttendanceStore`]
//! abstraction. Duplicate clock-in prevention is delegated to the store's
//! atomic conditional create, since deployments run multiple instances.

pub mod aggregate;
pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod geofence;
pub mod model;
pub mod payroll;
pub mod qr;
pub mod store;

pub use config::EngineConfig;
pub use error::{EngineError, Result};

pub use crate::classify::{FixedHolidays, HolidayCalendar, NoHolidays, classify};
pub use crate::clock::{ClockEngine, ClockState};
pub use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
pub use crate::model::classification::{Classification, DayType};
pub use crate::model::employee::{Employee, PayConfig, PayType};
pub use crate::model::qr_session::QrSession;
pub use crate::model::work_site::WorkSite;
pub use crate::model::{DateWindow, EmployeeId, GeoPoint, WorkSiteId};
pub use crate::store::{AttendanceStore, MemoryStore, StoreError};
