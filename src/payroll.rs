//! Payroll estimation from pay configuration and classified hours.
//!
//! Estimates only — authoritative payroll lives outside the engine. All
//! arithmetic tolerates missing fields by treating them as 0 and never
//! fails.

use serde::{Deserialize, Serialize};

use crate::model::classification::Classification;
use crate::model::employee::{Employee, PayConfig, PayType};

/// Average weeks per month, a deliberate approximation (52 / 12).
/// Changing it changes every weekly and hourly base estimate.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Per-bucket earnings for a period, at the effective hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BucketEarnings {
    pub regular: f64,
    pub overtime: f64,
    pub weekend: f64,
    pub holiday: f64,
    pub total: f64,
}

/// Company-wide monthly payroll estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PayrollSummary {
    pub total_base: f64,
    pub total_allowances: f64,
    pub total_deductions: f64,
    pub net: f64,
}

/// Estimated monthly base pay for one employee. Missing rates count as 0.
pub fn monthly_base(pay: &PayConfig) -> f64 {
    match pay.pay_type {
        PayType::Monthly => pay.monthly_rate.unwrap_or(0.0),
        PayType::Weekly => pay.weekly_rate.unwrap_or(0.0) * WEEKS_PER_MONTH,
        PayType::Hourly => {
            pay.hourly_rate.unwrap_or(0.0)
                * pay.standard_hours_per_day
                * pay.standard_days_per_week
                * WEEKS_PER_MONTH
        }
    }
}

/// Hourly rate used for premium (overtime/weekend/holiday) pay.
///
/// Salaried employees have no stored hourly rate, so their salary is
/// divided down by standard hours — an explicit derivation policy rather
/// than reusing a possibly-absent `hourly_rate` field. Zero standard hours
/// yields 0 instead of a division error.
pub fn effective_hourly_rate(pay: &PayConfig) -> f64 {
    let monthly_hours =
        pay.standard_hours_per_day * pay.standard_days_per_week * WEEKS_PER_MONTH;
    match pay.pay_type {
        PayType::Hourly => pay.hourly_rate.unwrap_or(0.0),
        PayType::Weekly => {
            let weekly_hours = pay.standard_hours_per_day * pay.standard_days_per_week;
            if weekly_hours > 0.0 {
                pay.weekly_rate.unwrap_or(0.0) / weekly_hours
            } else {
                0.0
            }
        }
        PayType::Monthly => {
            if monthly_hours > 0.0 {
                pay.monthly_rate.unwrap_or(0.0) / monthly_hours
            } else {
                0.0
            }
        }
    }
}

/// Earnings for a period's hour buckets: regular hours at the effective
/// rate, the premium buckets at their configured multipliers.
pub fn bucket_earnings(pay: &PayConfig, hours: &Classification) -> BucketEarnings {
    let rate = effective_hourly_rate(pay);
    let regular = hours.regular_hours * rate;
    let overtime = hours.overtime_hours * rate * pay.overtime_multiplier;
    let weekend = hours.weekend_hours * rate * pay.weekend_multiplier;
    let holiday = hours.holiday_hours * rate * pay.holiday_multiplier;
    BucketEarnings {
        regular,
        overtime,
        weekend,
        holiday,
        total: regular + overtime + weekend + holiday,
    }
}

/// Company-wide estimate: base pay plus allowances minus deductions across
/// the roster. An empty roster yields zero in every field.
pub fn company_summary(roster: &[Employee]) -> PayrollSummary {
    let mut summary = PayrollSummary::default();
    for employee in roster {
        summary.total_base += monthly_base(&employee.pay);
        summary.total_allowances += employee.pay.allowances.values().sum::<f64>();
        summary.total_deductions += employee.pay.deductions.values().sum::<f64>();
    }
    summary.net = summary.total_base + summary.total_allowances - summary.total_deductions;
    summary
}
