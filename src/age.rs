//! age.rs — coarse relative age of a result. Pure; the caller re-evaluates
//! on its own cadence if it wants a live display.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Now,
    Minutes(i64),
    Hours(i64),
}

/// Bucket the delta between `created_at` and `now`: under a minute is
/// `Now`, under an hour whole minutes (floor), otherwise whole hours
/// (floor). Skewed clocks (a future `created_at`) collapse to `Now`.
pub fn age_between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Age {
    let secs = (now - created_at).num_seconds().max(0);
    if secs < 60 {
        Age::Now
    } else if secs < 3600 {
        Age::Minutes(secs / 60)
    } else {
        Age::Hours(secs / 3600)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Age::Now => write!(f, "now"),
            Age::Minutes(m) => write!(f, "{m}m"),
            Age::Hours(h) => write!(f, "{h}h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn buckets_follow_the_minute_and_hour_boundaries() {
        let now = at(10_000);
        assert_eq!(age_between(at(10_000), now), Age::Now);
        assert_eq!(age_between(at(10_000 - 59), now), Age::Now);
        assert_eq!(age_between(at(10_000 - 60), now), Age::Minutes(1));
        assert_eq!(age_between(at(10_000 - 3_599), now), Age::Minutes(59));
        assert_eq!(age_between(at(10_000 - 3_600), now), Age::Hours(1));
        assert_eq!(age_between(at(10_000 - 7_320), now), Age::Hours(2));
    }

    #[test]
    fn future_timestamps_collapse_to_now() {
        let now = at(500);
        assert_eq!(age_between(at(900), now), Age::Now);
    }

    #[test]
    fn display_matches_the_feed_labels() {
        assert_eq!(Age::Now.to_string(), "now");
        assert_eq!(Age::Minutes(12).to_string(), "12m");
        assert_eq!(Age::Hours(3).to_string(), "3h");
    }
}
