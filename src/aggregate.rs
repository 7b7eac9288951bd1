//! Batch statistics over attendance history.
//!
//! Every function here is pure over a slice of records — a snapshot, with no
//! coordination against concurrent writers — and never fails: missing or
//! partial data counts as zero, empty rosters produce empty results, and
//! divisions guard their denominators so no NaN/Inf leaks into output.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::classify::{HolidayCalendar, classify};
use crate::config::EngineConfig;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::classification::Classification;
use crate::model::employee::Employee;
use crate::model::{DateWindow, EmployeeId};

/// Attendance statistics over a date window for one employee.
///
/// Field names are a stable output contract for downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub present_days: u32,
    pub late_days: u32,
    pub absent_days: u32,
    pub window_days: u32,
    pub total_hours: f64,
    pub average_hours: f64,
    /// Mean clock-in time formatted `HH:MM`, `--:--` with no clock-ins.
    pub avg_check_in: String,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub weekend_hours: f64,
    pub holiday_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerRank {
    pub employee_id: EmployeeId,
    pub name: String,
    pub present_days: u32,
    pub on_time_days: u32,
    pub total_hours: f64,
    /// On-time percentage over present days.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateArrival {
    pub employee_id: EmployeeId,
    pub name: String,
    pub late_days: u32,
}

/// Hour totals for a rolling week of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WeeklyBreakdown {
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub weekend_hours: f64,
    pub holiday_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    PerfectMonth,
    EarlyBird,
    Streak(u32),
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Achievement::PerfectMonth => write!(f, "Perfect Month"),
            Achievement::EarlyBird => write!(f, "Early Bird"),
            Achievement::Streak(days) => write!(f, "{days}-Day Streak"),
        }
    }
}

/// Company-scope daily warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Alert {
    HighAbsence { absent: u32, fraction: f64 },
    HighLateArrivals { late: u32, fraction: f64 },
}

/// Behavioral call-outs derived from an employee's recent records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Insight {
    ExcellentPunctuality { rate: f64 },
    PunctualityWarning { rate: f64 },
    StreakCallout { days: u32 },
    HighAverageHours { average: f64 },
}

const PUNCTUALITY_PRAISE_RATE: f64 = 90.0;
const PUNCTUALITY_WARNING_RATE: f64 = 70.0;
const HIGH_AVERAGE_HOURS: f64 = 8.5;
const INSIGHT_WINDOW: usize = 7;

fn classification_of<C: HolidayCalendar>(
    record: &AttendanceRecord,
    calendar: &C,
    standard_hours_per_day: f64,
) -> Classification {
    // The cached copy on the record is never trusted here; aggregation
    // always recomputes from the raw times.
    classify(
        record.date,
        record.clock_in,
        record.clock_out,
        calendar,
        standard_hours_per_day,
    )
    .unwrap_or_else(|_| Classification::incomplete())
}

/// Attendance counts, hour buckets and average check-in over a window.
pub fn monthly_stats<C: HolidayCalendar>(
    records: &[AttendanceRecord],
    window: DateWindow,
    calendar: &C,
    config: &EngineConfig,
) -> MonthlyStats {
    let mut present_days = 0u32;
    let mut late_days = 0u32;
    let mut worked_days = 0u32;
    let mut check_in_minutes: Vec<i64> = Vec::new();
    let mut total_hours = 0.0;
    let mut regular_hours = 0.0;
    let mut overtime_hours = 0.0;
    let mut weekend_hours = 0.0;
    let mut holiday_hours = 0.0;

    for record in records.iter().filter(|r| window.contains(r.date)) {
        let Some(clock_in) = record.clock_in else {
            continue;
        };
        present_days += 1;
        if record.status == AttendanceStatus::Late {
            late_days += 1;
        }
        check_in_minutes.push(i64::from(clock_in.hour()) * 60 + i64::from(clock_in.minute()));

        let c = classification_of(record, calendar, config.standard_hours_per_day);
        if c.total_hours > 0.0 {
            worked_days += 1;
        }
        total_hours += c.total_hours;
        regular_hours += c.regular_hours;
        overtime_hours += c.overtime_hours;
        weekend_hours += c.weekend_hours;
        holiday_hours += c.holiday_hours;
    }

    let absent_days = window.days().saturating_sub(present_days);
    let average_hours = if worked_days > 0 {
        total_hours / f64::from(worked_days)
    } else {
        0.0
    };

    let avg_check_in = if check_in_minutes.is_empty() {
        "--:--".to_string()
    } else {
        let sum: i64 = check_in_minutes.iter().sum();
        let mean = (sum as f64 / check_in_minutes.len() as f64).round() as i64;
        format!("{:02}:{:02}", mean / 60, mean % 60)
    };

    MonthlyStats {
        present_days,
        late_days,
        absent_days,
        window_days: window.days(),
        total_hours,
        average_hours,
        avg_check_in,
        regular_hours,
        overtime_hours,
        weekend_hours,
        holiday_hours,
    }
}

/// Percentage of present days without a late mark; 0 when never present.
pub fn punctuality_rate(present_days: u32, late_days: u32) -> f64 {
    if present_days == 0 {
        return 0.0;
    }
    f64::from(present_days.saturating_sub(late_days)) / f64::from(present_days) * 100.0
}

#[derive(Default)]
struct EmployeeTally {
    present: u32,
    on_time: u32,
    late: u32,
    total_hours: f64,
}

fn tally_by_employee<C: HolidayCalendar>(
    records: &[AttendanceRecord],
    calendar: &C,
    config: &EngineConfig,
) -> BTreeMap<EmployeeId, EmployeeTally> {
    let mut tallies: BTreeMap<EmployeeId, EmployeeTally> = BTreeMap::new();
    for record in records {
        let entry = tallies.entry(record.employee_id).or_default();
        if record.clock_in.is_some() {
            entry.present += 1;
            if record.status == AttendanceStatus::Late {
                entry.late += 1;
            } else {
                entry.on_time += 1;
            }
            entry.total_hours +=
                classification_of(record, calendar, config.standard_hours_per_day).total_hours;
        }
    }
    tallies
}

/// Company-wide on-time ranking over the given records.
///
/// Only employees on the roster with at least the configured number of
/// present days qualify; ties are broken by ascending employee id so the
/// ordering is deterministic.
pub fn top_performers<C: HolidayCalendar>(
    records: &[AttendanceRecord],
    roster: &[Employee],
    calendar: &C,
    config: &EngineConfig,
) -> Vec<PerformerRank> {
    let tallies = tally_by_employee(records, calendar, config);

    let mut ranked: Vec<PerformerRank> = roster
        .iter()
        .filter_map(|emp| {
            let tally = tallies.get(&emp.id)?;
            if tally.present < config.top_performer_min_present {
                return None;
            }
            Some(PerformerRank {
                employee_id: emp.id,
                name: emp.name.clone(),
                present_days: tally.present,
                on_time_days: tally.on_time,
                total_hours: tally.total_hours,
                score: f64::from(tally.on_time) / f64::from(tally.present) * 100.0,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.employee_id.cmp(&b.employee_id))
    });
    ranked.truncate(config.leaderboard_size);
    ranked
}

/// Employees with the most late arrivals over the given records.
pub fn late_leaderboard<C: HolidayCalendar>(
    records: &[AttendanceRecord],
    roster: &[Employee],
    calendar: &C,
    config: &EngineConfig,
) -> Vec<LateArrival> {
    let tallies = tally_by_employee(records, calendar, config);

    let mut late: Vec<LateArrival> = roster
        .iter()
        .filter_map(|emp| {
            let tally = tallies.get(&emp.id)?;
            if tally.late == 0 {
                return None;
            }
            Some(LateArrival {
                employee_id: emp.id,
                name: emp.name.clone(),
                late_days: tally.late,
            })
        })
        .collect();

    late.sort_by(|a, b| {
        b.late_days
            .cmp(&a.late_days)
            .then(a.employee_id.cmp(&b.employee_id))
    });
    late.truncate(config.leaderboard_size);
    late
}

/// Consecutive calendar days with a clock-in, counted backward from the
/// most recent record. A record without a clock-in or a gap in the dates
/// ends the streak.
pub fn current_streak(records: &[AttendanceRecord]) -> u32 {
    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0u32;
    let mut expected: Option<NaiveDate> = None;
    for record in sorted {
        if record.clock_in.is_none() {
            break;
        }
        if let Some(date) = expected {
            if record.date != date {
                break;
            }
        }
        streak += 1;
        expected = record.date.pred_opt();
    }
    streak
}

/// Badges earned from the record history; derived on demand, never stored.
pub fn achievements(
    records: &[AttendanceRecord],
    today: NaiveDate,
    config: &EngineConfig,
) -> Vec<Achievement> {
    let mut badges = Vec::new();

    let this_month: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.date.year() == today.year() && r.date.month() == today.month())
        .collect();
    let present_this_month = this_month.iter().filter(|r| r.clock_in.is_some()).count() as u32;
    if present_this_month >= config.perfect_month_min_days
        && this_month.iter().all(|r| r.clock_in.is_some())
    {
        badges.push(Achievement::PerfectMonth);
    }

    let early_count = records
        .iter()
        .filter(|r| matches!(r.clock_in, Some(t) if t < config.early_bird_cutoff))
        .count() as u32;
    if early_count >= config.early_bird_min_count {
        badges.push(Achievement::EarlyBird);
    }

    let streak = current_streak(records);
    let mut thresholds = config.streak_badge_thresholds.clone();
    thresholds.sort_unstable();
    for threshold in thresholds {
        if streak >= threshold {
            badges.push(Achievement::Streak(threshold));
        }
    }

    badges
}

/// Company-scope alerts for one day's records against the full roster.
pub fn daily_alerts(
    today_records: &[AttendanceRecord],
    roster_size: usize,
    config: &EngineConfig,
) -> Vec<Alert> {
    if roster_size == 0 {
        return Vec::new();
    }

    let mut alerts = Vec::new();
    let roster = roster_size as f64;
    let clocked_in = today_records.iter().filter(|r| r.clock_in.is_some()).count();
    let absent = roster_size.saturating_sub(clocked_in) as u32;

    if f64::from(absent) > roster * config.absence_alert_fraction {
        alerts.push(Alert::HighAbsence {
            absent,
            fraction: f64::from(absent) / roster,
        });
    }

    let late = today_records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count() as u32;
    if f64::from(late) > roster * config.late_alert_fraction {
        alerts.push(Alert::HighLateArrivals {
            late,
            fraction: f64::from(late) / roster,
        });
    }

    alerts
}

/// Hour buckets summed over a week of records.
pub fn weekly_breakdown<C: HolidayCalendar>(
    records: &[AttendanceRecord],
    calendar: &C,
    config: &EngineConfig,
) -> WeeklyBreakdown {
    let mut breakdown = WeeklyBreakdown::default();
    for record in records {
        let c = classification_of(record, calendar, config.standard_hours_per_day);
        breakdown.regular_hours += c.regular_hours;
        breakdown.overtime_hours += c.overtime_hours;
        breakdown.weekend_hours += c.weekend_hours;
        breakdown.holiday_hours += c.holiday_hours;
    }
    breakdown
}

/// Behavioral call-outs over the most recent records (expects newest first;
/// sorts defensively).
pub fn insights<C: HolidayCalendar>(
    records: &[AttendanceRecord],
    calendar: &C,
    config: &EngineConfig,
) -> Vec<Insight> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    let recent = &sorted[..sorted.len().min(INSIGHT_WINDOW)];

    let mut out = Vec::new();

    let on_time = recent
        .iter()
        .filter(|r| r.clock_in.is_some() && r.status != AttendanceStatus::Late)
        .count();
    let rate = on_time as f64 / recent.len().max(1) as f64 * 100.0;
    if rate >= PUNCTUALITY_PRAISE_RATE {
        out.push(Insight::ExcellentPunctuality { rate });
    } else if rate < PUNCTUALITY_WARNING_RATE {
        out.push(Insight::PunctualityWarning { rate });
    }

    let streak = current_streak(records);
    if let Some(&min_badge) = config.streak_badge_thresholds.iter().min() {
        if streak >= min_badge {
            out.push(Insight::StreakCallout { days: streak });
        }
    }

    let average = recent
        .iter()
        .map(|r| classification_of(r, calendar, config.standard_hours_per_day).total_hours)
        .sum::<f64>()
        / recent.len().max(1) as f64;
    if average > HIGH_AVERAGE_HOURS {
        out.push(Insight::HighAverageHours { average });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::NoHolidays;
    use chrono::NaiveTime;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn t(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn rec(
        emp: u64,
        date: NaiveDate,
        clock_in: Option<NaiveTime>,
        clock_out: Option<NaiveTime>,
        status: AttendanceStatus,
    ) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: EmployeeId(emp),
            date,
            clock_in,
            clock_in_location: None,
            clock_out,
            clock_out_location: None,
            work_site_id: None,
            status,
            classification: None,
        }
    }

    fn present(emp: u64, date: NaiveDate) -> AttendanceRecord {
        rec(emp, date, t(8, 55), t(17, 0), AttendanceStatus::Present)
    }

    fn late(emp: u64, date: NaiveDate) -> AttendanceRecord {
        rec(emp, date, t(9, 40), t(17, 0), AttendanceStatus::Late)
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn punctuality_is_zero_not_nan_with_no_present_days() {
        let rate = punctuality_rate(0, 0);
        assert_eq!(rate, 0.0);
        assert!(rate.is_finite());
    }

    #[test]
    fn punctuality_counts_late_days() {
        assert_eq!(punctuality_rate(10, 2), 80.0);
    }

    #[test]
    fn monthly_stats_counts_and_buckets() {
        // Mon 2nd present 8h, Tue 3rd late 9h (1h OT), Sat 7th 4h weekend
        let records = vec![
            rec(1, d(2), t(9, 0), t(17, 0), AttendanceStatus::Present),
            rec(1, d(3), t(9, 30), t(18, 30), AttendanceStatus::Late),
            rec(1, d(7), t(10, 0), t(14, 0), AttendanceStatus::Present),
        ];
        let window = DateWindow::new(d(1), d(10));
        let stats = monthly_stats(&records, window, &NoHolidays, &config());

        assert_eq!(stats.present_days, 3);
        assert_eq!(stats.late_days, 1);
        assert_eq!(stats.absent_days, 7);
        assert_eq!(stats.window_days, 10);
        assert_eq!(stats.total_hours, 21.0);
        assert_eq!(stats.regular_hours, 16.0);
        assert_eq!(stats.overtime_hours, 1.0);
        assert_eq!(stats.weekend_hours, 4.0);
        assert_eq!(stats.holiday_hours, 0.0);
        assert_eq!(stats.average_hours, 7.0);
    }

    #[test]
    fn monthly_stats_empty_input_is_all_zero() {
        let window = DateWindow::new(d(1), d(31));
        let stats = monthly_stats(&[], window, &NoHolidays, &config());
        assert_eq!(stats.present_days, 0);
        assert_eq!(stats.absent_days, 31);
        assert_eq!(stats.avg_check_in, "--:--");
        assert_eq!(stats.average_hours, 0.0);
    }

    #[test]
    fn average_check_in_is_the_mean_minute() {
        let records = vec![
            rec(1, d(2), t(8, 0), None, AttendanceStatus::Present),
            rec(1, d(3), t(10, 0), None, AttendanceStatus::Late),
        ];
        let stats = monthly_stats(
            &records,
            DateWindow::new(d(1), d(5)),
            &NoHolidays,
            &config(),
        );
        assert_eq!(stats.avg_check_in, "09:00");
    }

    #[test]
    fn streak_counts_back_from_most_recent() {
        let records = vec![
            present(1, d(10)),
            present(1, d(9)),
            present(1, d(8)),
            rec(1, d(7), None, None, AttendanceStatus::Absent),
            present(1, d(6)),
        ];
        assert_eq!(current_streak(&records), 3);
    }

    #[test]
    fn streak_breaks_on_a_date_gap() {
        let records = vec![present(1, d(10)), present(1, d(8))];
        assert_eq!(current_streak(&records), 1);
    }

    #[test]
    fn streak_of_empty_history_is_zero() {
        assert_eq!(current_streak(&[]), 0);
    }

    #[test]
    fn top_performers_rank_and_tiebreak() {
        let mut records = Vec::new();
        // emp 1: 6 present, 1 late; emp 2: 6 present, 0 late; emp 3: 6 present, 0 late
        for day in 2..8 {
            records.push(if day == 2 {
                late(1, d(day))
            } else {
                present(1, d(day))
            });
            records.push(present(2, d(day)));
            records.push(present(3, d(day)));
        }
        // emp 4 below the present-day minimum
        records.push(present(4, d(2)));

        let roster: Vec<Employee> = (1..=4)
            .map(|id| Employee::new(EmployeeId(id), format!("E{id}"), Default::default()))
            .collect();
        let ranked = top_performers(&records, &roster, &NoHolidays, &config());

        assert_eq!(ranked.len(), 3);
        // perfect scores tie, broken by ascending id
        assert_eq!(ranked[0].employee_id, EmployeeId(2));
        assert_eq!(ranked[1].employee_id, EmployeeId(3));
        assert_eq!(ranked[2].employee_id, EmployeeId(1));
        assert_eq!(ranked[0].score, 100.0);
        assert!(ranked[2].score < 100.0);
    }

    #[test]
    fn late_leaderboard_orders_by_late_days() {
        let records = vec![
            late(1, d(2)),
            late(1, d(3)),
            late(2, d(2)),
            present(3, d(2)),
        ];
        let roster: Vec<Employee> = (1..=3)
            .map(|id| Employee::new(EmployeeId(id), format!("E{id}"), Default::default()))
            .collect();
        let board = late_leaderboard(&records, &roster, &NoHolidays, &config());
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].employee_id, EmployeeId(1));
        assert_eq!(board[0].late_days, 2);
        assert_eq!(board[1].late_days, 1);
    }

    #[test]
    fn perfect_month_requires_every_record_clocked_in() {
        let today = d(31);
        // 20 weekday-equivalent present days
        let records: Vec<AttendanceRecord> = (1..=20).map(|day| present(1, d(day))).collect();
        assert!(achievements(&records, today, &config()).contains(&Achievement::PerfectMonth));

        // one absent record spoils it
        let mut spoiled = records.clone();
        spoiled.push(rec(1, d(21), None, None, AttendanceStatus::Absent));
        assert!(
            !achievements(&spoiled, today, &config()).contains(&Achievement::PerfectMonth)
        );

        // 19 present days is not enough
        let few: Vec<AttendanceRecord> = (1..=19).map(|day| present(1, d(day))).collect();
        assert!(!achievements(&few, today, &config()).contains(&Achievement::PerfectMonth));
    }

    #[test]
    fn early_bird_counts_lifetime_early_clock_ins() {
        let records: Vec<AttendanceRecord> = (1..=10).map(|day| present(1, d(day))).collect();
        assert!(achievements(&records, d(31), &config()).contains(&Achievement::EarlyBird));

        let at_nine: Vec<AttendanceRecord> = (1..=10)
            .map(|day| rec(1, d(day), t(9, 0), t(17, 0), AttendanceStatus::Present))
            .collect();
        // 09:00 exactly is not before the cutoff
        assert!(!achievements(&at_nine, d(31), &config()).contains(&Achievement::EarlyBird));
    }

    #[test]
    fn streak_badges_follow_configured_thresholds() {
        let records: Vec<AttendanceRecord> = (1..=6).map(|day| present(1, d(day))).collect();
        let badges = achievements(&records, d(6), &config());
        assert!(badges.contains(&Achievement::Streak(5)));
        assert!(!badges.contains(&Achievement::Streak(30)));
    }

    #[test]
    fn alerts_fire_above_the_configured_fractions() {
        // roster of 10: 4 absent (40% > 30%), 3 late (30% > 20%)
        let mut today = Vec::new();
        for emp in 1..=3 {
            today.push(late(emp, d(2)));
        }
        for emp in 4..=6 {
            today.push(present(emp, d(2)));
        }
        let alerts = daily_alerts(&today, 10, &config());
        assert_eq!(alerts.len(), 2);
        assert!(matches!(alerts[0], Alert::HighAbsence { absent: 4, .. }));
        assert!(matches!(alerts[1], Alert::HighLateArrivals { late: 3, .. }));
    }

    #[test]
    fn quiet_day_raises_no_alerts() {
        let today: Vec<AttendanceRecord> = (1..=9).map(|emp| present(emp, d(2))).collect();
        assert!(daily_alerts(&today, 10, &config()).is_empty());
    }

    #[test]
    fn empty_roster_raises_no_alerts() {
        assert!(daily_alerts(&[], 0, &config()).is_empty());
    }

    #[test]
    fn weekly_breakdown_sums_buckets() {
        let records = vec![
            rec(1, d(2), t(9, 0), t(18, 0), AttendanceStatus::Present), // 8 + 1 OT
            rec(1, d(7), t(10, 0), t(13, 0), AttendanceStatus::Present), // Sat, 3h
        ];
        let b = weekly_breakdown(&records, &NoHolidays, &config());
        assert_eq!(b.regular_hours, 8.0);
        assert_eq!(b.overtime_hours, 1.0);
        assert_eq!(b.weekend_hours, 3.0);
    }

    #[test]
    fn insights_praise_punctual_streaks() {
        let records: Vec<AttendanceRecord> = (1..=7).map(|day| present(1, d(day))).collect();
        let found = insights(&records, &NoHolidays, &config());
        assert!(found
            .iter()
            .any(|i| matches!(i, Insight::ExcellentPunctuality { .. })));
        assert!(found
            .iter()
            .any(|i| matches!(i, Insight::StreakCallout { days: 7 })));
    }

    #[test]
    fn insights_warn_on_poor_punctuality() {
        let records: Vec<AttendanceRecord> = (1..=7).map(|day| late(1, d(day))).collect();
        let found = insights(&records, &NoHolidays, &config());
        assert!(found
            .iter()
            .any(|i| matches!(i, Insight::PunctualityWarning { .. })));
    }
}
