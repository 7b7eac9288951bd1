use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How a worked day is categorized for pay purposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayType {
    Regular,
    Weekend,
    Holiday,
    Incomplete,
}

/// The split of one day's worked duration into pay buckets.
///
/// Derived from an attendance record plus a holiday calendar; any copy
/// stored on a record is a cache, never the authority. Field names are a
/// stable output contract for downstream report and payroll consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub day_type: DayType,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub weekend_hours: f64,
    pub holiday_hours: f64,
    pub total_hours: f64,
}

impl Classification {
    /// The classification of a day missing a clock-in or clock-out.
    pub fn incomplete() -> Self {
        Self {
            day_type: DayType::Incomplete,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            weekend_hours: 0.0,
            holiday_hours: 0.0,
            total_hours: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_is_all_zero() {
        let c = Classification::incomplete();
        assert_eq!(c.day_type, DayType::Incomplete);
        assert_eq!(c.total_hours, 0.0);
        assert_eq!(
            c.regular_hours + c.overtime_hours + c.weekend_hours + c.holiday_hours,
            0.0
        );
    }

    #[test]
    fn day_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DayType::Weekend).unwrap(),
            "\"weekend\""
        );
        assert_eq!(DayType::Holiday.to_string(), "holiday");
    }
}
