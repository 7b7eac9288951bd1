//! Geofence validation for work-site clock-ins.
//!
//! Pure functions; the caller is responsible for detecting a missing
//! coordinate before calling. All distances are in meters end to end —
//! conversion to other units belongs at the display boundary.

use serde::{Deserialize, Serialize};

use crate::model::GeoPoint;
use crate::model::work_site::WorkSite;

/// Spherical Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Outcome of checking a coordinate against a site's geofence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceCheck {
    pub within: bool,
    pub distance_m: f64,
}

/// Great-circle distance between two coordinates via the haversine formula.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether `point` lies within the site's allowed radius.
pub fn check(point: &GeoPoint, site: &WorkSite) -> GeofenceCheck {
    let distance = distance_m(point.latitude, point.longitude, site.latitude, site.longitude);
    GeofenceCheck {
        within: distance <= site.radius_m,
        distance_m: distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkSiteId;

    fn site(lat: f64, lon: f64, radius_m: f64) -> WorkSite {
        WorkSite {
            id: WorkSiteId(1),
            name: "HQ".into(),
            latitude: lat,
            longitude: lon,
            radius_m,
            active: true,
        }
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint {
            latitude: lat,
            longitude: lon,
            accuracy: None,
        }
    }

    #[test]
    fn point_at_center_is_within_any_positive_radius() {
        let s = site(12.9716, 77.5946, 1.0);
        let result = check(&point(12.9716, 77.5946), &s);
        assert!(result.within);
        assert_eq!(result.distance_m, 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_m(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = distance_m(12.9716, 77.5946, 13.0827, 80.2707);
        let back = distance_m(13.0827, 80.2707, 12.9716, 77.5946);
        assert!((forward - back).abs() < 1e-9);
    }

    #[test]
    fn point_beyond_radius_is_rejected() {
        // ~157m north-east of center, 100m radius
        let s = site(12.9716, 77.5946, 100.0);
        let result = check(&point(12.9726, 77.5956), &s);
        assert!(!result.within);
        assert!(result.distance_m > 100.0);
    }
}
