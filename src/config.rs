use std::env;
use std::str::FromStr;

use chrono::NaiveTime;
use dotenvy::dotenv;

/// Engine-wide tunables.
///
/// Every threshold the computations depend on lives here rather than as a
/// constant buried in a function. `from_env` overrides any default from
/// `ENGINE_*` variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Start of the working day; clock-ins after this (plus grace) are late.
    pub workday_start: NaiveTime,
    /// Minutes after `workday_start` still counted as on time.
    pub late_grace_minutes: i64,
    pub standard_hours_per_day: f64,
    pub standard_days_per_week: f64,
    /// Clock-out time stamped on records by the auto-close sweep.
    pub auto_close_time: NaiveTime,
    /// Streak lengths that earn an "N-Day Streak" badge.
    pub streak_badge_thresholds: Vec<u32>,
    /// Present days this month required for the "Perfect Month" badge.
    pub perfect_month_min_days: u32,
    /// Clock-ins strictly before this time count toward "Early Bird".
    pub early_bird_cutoff: NaiveTime,
    pub early_bird_min_count: u32,
    /// Fraction of the roster absent today that raises a high-absence alert.
    pub absence_alert_fraction: f64,
    /// Fraction of the roster late today that raises a late-arrivals alert.
    pub late_alert_fraction: f64,
    /// Minimum present days to qualify for the top-performer ranking.
    pub top_performer_min_present: u32,
    /// Entries returned by the leaderboard queries.
    pub leaderboard_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workday_start: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            late_grace_minutes: 15,
            standard_hours_per_day: 8.0,
            standard_days_per_week: 5.0,
            auto_close_time: NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"),
            streak_badge_thresholds: vec![5, 30],
            perfect_month_min_days: 20,
            early_bird_cutoff: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            early_bird_min_count: 10,
            absence_alert_fraction: 0.3,
            late_alert_fraction: 0.2,
            top_performer_min_present: 5,
            leaderboard_size: 5,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();
        Self {
            workday_start: env_time("ENGINE_WORKDAY_START", defaults.workday_start),
            late_grace_minutes: env_parse(
                "ENGINE_LATE_GRACE_MINUTES",
                defaults.late_grace_minutes,
            ),
            standard_hours_per_day: env_parse(
                "ENGINE_STANDARD_HOURS_PER_DAY",
                defaults.standard_hours_per_day,
            ),
            standard_days_per_week: env_parse(
                "ENGINE_STANDARD_DAYS_PER_WEEK",
                defaults.standard_days_per_week,
            ),
            auto_close_time: env_time("ENGINE_AUTO_CLOSE_TIME", defaults.auto_close_time),
            streak_badge_thresholds: env_list(
                "ENGINE_STREAK_BADGE_THRESHOLDS",
                defaults.streak_badge_thresholds,
            ),
            perfect_month_min_days: env_parse(
                "ENGINE_PERFECT_MONTH_MIN_DAYS",
                defaults.perfect_month_min_days,
            ),
            early_bird_cutoff: env_time(
                "ENGINE_EARLY_BIRD_CUTOFF",
                defaults.early_bird_cutoff,
            ),
            early_bird_min_count: env_parse(
                "ENGINE_EARLY_BIRD_MIN_COUNT",
                defaults.early_bird_min_count,
            ),
            absence_alert_fraction: env_parse(
                "ENGINE_ABSENCE_ALERT_FRACTION",
                defaults.absence_alert_fraction,
            ),
            late_alert_fraction: env_parse(
                "ENGINE_LATE_ALERT_FRACTION",
                defaults.late_alert_fraction,
            ),
            top_performer_min_present: env_parse(
                "ENGINE_TOP_PERFORMER_MIN_PRESENT",
                defaults.top_performer_min_present,
            ),
            leaderboard_size: env_parse("ENGINE_LEADERBOARD_SIZE", defaults.leaderboard_size),
        }
    }

    /// Latest clock-in time still counted as on time.
    pub fn late_cutoff(&self) -> NaiveTime {
        self.workday_start + chrono::Duration::minutes(self.late_grace_minutes)
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_time(key: &str, default: NaiveTime) -> NaiveTime {
    env::var(key)
        .ok()
        .and_then(|v| {
            NaiveTime::parse_from_str(&v, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(&v, "%H:%M"))
                .ok()
        })
        .unwrap_or(default)
}

fn env_list(key: &str, default: Vec<u32>) -> Vec<u32> {
    match env::var(key) {
        Ok(raw) => {
            let parsed: Vec<u32> = raw
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if parsed.is_empty() { default } else { parsed }
        }
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_late_cutoff_includes_grace() {
        let config = EngineConfig::default();
        assert_eq!(
            config.late_cutoff(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap()
        );
    }

    #[test]
    fn unset_env_list_keeps_defaults() {
        assert_eq!(env_list("ENGINE_TEST_UNSET_KEY", vec![5, 30]), vec![5, 30]);
    }
}
