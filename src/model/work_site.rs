use serde::{Deserialize, Serialize};

use crate::model::WorkSiteId;

/// A work site with a circular geofence around its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSite {
    pub id: WorkSiteId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Allowed clock-in radius around the center, in meters.
    pub radius_m: f64,
    /// Inactive sites do not gate clock-ins.
    pub active: bool,
}
