use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::model::EmployeeId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayType {
    Hourly,
    Weekly,
    Monthly,
}

/// Pay configuration embedded in an employee profile.
///
/// Rates are optional; any missing numeric field is treated as 0 by the
/// payroll estimator rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayConfig {
    pub pay_type: PayType,
    pub hourly_rate: Option<f64>,
    pub weekly_rate: Option<f64>,
    pub monthly_rate: Option<f64>,
    pub currency: String,
    pub overtime_multiplier: f64,
    pub weekend_multiplier: f64,
    pub holiday_multiplier: f64,
    pub standard_hours_per_day: f64,
    pub standard_days_per_week: f64,
    /// Named fixed monthly allowances (housing, transport, ...).
    pub allowances: BTreeMap<String, f64>,
    /// Named fixed monthly deductions (tax, insurance, ...).
    pub deductions: BTreeMap<String, f64>,
}

impl Default for PayConfig {
    fn default() -> Self {
        Self {
            pay_type: PayType::Monthly,
            hourly_rate: None,
            weekly_rate: None,
            monthly_rate: None,
            currency: "INR".to_string(),
            overtime_multiplier: 1.5,
            weekend_multiplier: 2.0,
            holiday_multiplier: 2.5,
            standard_hours_per_day: 8.0,
            standard_days_per_week: 5.0,
            allowances: BTreeMap::new(),
            deductions: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: Option<String>,
    pub pay: PayConfig,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>, pay: PayConfig) -> Self {
        Self {
            id,
            name: name.into(),
            department: None,
            pay,
        }
    }
}
