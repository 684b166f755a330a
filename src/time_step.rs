//! Time discretisation of the demand series.
//!
//! Every entry of the net-demand series represents average power over one uniform step. The
//! duration of that step is carried as a magnitude plus a unit tag, so it can be reported in the
//! unit it was derived in while all arithmetic happens on the normalised value.
use crate::units::Hours;
use anyhow::{Context, anyhow, ensure};
use itertools::Itertools;
use std::fmt::Display;
use std::str::FromStr;
use strum::EnumString;

/// Units in which a time step can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TimeUnit {
    /// Seconds
    #[strum(to_string = "s", serialize = "sec", serialize = "second", serialize = "seconds")]
    Seconds,
    /// Minutes
    #[strum(to_string = "min", serialize = "minute", serialize = "minutes")]
    Minutes,
    /// Hours
    #[strum(to_string = "hr", serialize = "h", serialize = "hour", serialize = "hours")]
    Hours,
    /// Days
    #[strum(to_string = "day", serialize = "d", serialize = "days")]
    Days,
}

impl TimeUnit {
    /// The length of one of this unit in seconds.
    fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => 86400.0,
        }
    }
}

/// The uniform duration represented by one entry of the demand series.
///
/// Two [`TimeDelta`]s compare equal if they denote the same duration, regardless of the unit they
/// are expressed in.
#[derive(Debug, Clone, Copy)]
pub struct TimeDelta {
    /// The magnitude of the duration, in `unit`s
    pub value: f64,
    /// The unit the duration is expressed in
    pub unit: TimeUnit,
}

impl TimeDelta {
    /// Create a new time delta from a magnitude and unit.
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// The duration normalised to hours, for use in objective scaling.
    pub fn hours(&self) -> Hours {
        Hours(self.value * self.unit.seconds() / TimeUnit::Hours.seconds())
    }

    /// Express an elapsed duration in the coarsest unit in which it is a whole number.
    ///
    /// A 48-hour gap becomes 2 days and a 90-minute gap becomes 90 minutes. Durations that are
    /// not a whole number of any supported unit fall back to fractional hours.
    pub fn from_elapsed(elapsed: chrono::TimeDelta) -> Self {
        let seconds = elapsed.num_seconds() as f64;
        for unit in [
            TimeUnit::Days,
            TimeUnit::Hours,
            TimeUnit::Minutes,
            TimeUnit::Seconds,
        ] {
            let value = seconds / unit.seconds();
            if value >= 1.0 && value.fract().abs() < 1e-9 {
                return Self::new(value, unit);
            }
        }

        Self::new(seconds / TimeUnit::Hours.seconds(), TimeUnit::Hours)
    }
}

impl Default for TimeDelta {
    /// The default time step for a demand series with no timestamp index is one hour.
    fn default() -> Self {
        Self::new(1.0, TimeUnit::Hours)
    }
}

impl PartialEq for TimeDelta {
    fn eq(&self, other: &Self) -> bool {
        float_cmp::approx_eq!(f64, self.hours().value(), other.hours().value(), ulps = 4)
    }
}

impl Display for TimeDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for TimeDelta {
    type Err = anyhow::Error;

    /// Parse a literal such as `"2 hr"` or `"30 min"` into a time delta.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = s
            .split_whitespace()
            .collect_tuple()
            .with_context(|| format!("Invalid time delta '{s}': should be in form '2 hr'"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("Invalid magnitude in time delta '{s}'"))?;
        let unit: TimeUnit = unit
            .parse()
            .map_err(|_| anyhow!("Unknown time unit '{unit}'"))?;
        ensure!(
            value.is_finite() && value > 0.0,
            "Time delta must be positive, got '{s}'"
        );

        Ok(Self::new(value, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2 hr", 2.0, TimeUnit::Hours)]
    #[case("1 hour", 1.0, TimeUnit::Hours)]
    #[case("30 min", 30.0, TimeUnit::Minutes)]
    #[case("2 day", 2.0, TimeUnit::Days)]
    #[case("90 s", 90.0, TimeUnit::Seconds)]
    #[case("0.5 hr", 0.5, TimeUnit::Hours)]
    fn test_parse_literal(#[case] literal: &str, #[case] value: f64, #[case] unit: TimeUnit) {
        let time_delta: TimeDelta = literal.parse().unwrap();
        assert_eq!(time_delta, TimeDelta::new(value, unit));
        assert_eq!(time_delta.unit, unit);
    }

    #[rstest]
    #[case("2")]
    #[case("hr")]
    #[case("two hr")]
    #[case("2 fortnights")]
    #[case("-1 hr")]
    #[case("0 hr")]
    fn test_parse_invalid_literal(#[case] literal: &str) {
        assert!(literal.parse::<TimeDelta>().is_err());
    }

    #[test]
    fn test_equality_across_units() {
        assert_eq!(
            TimeDelta::new(48.0, TimeUnit::Hours),
            TimeDelta::new(2.0, TimeUnit::Days)
        );
        assert_ne!(
            TimeDelta::new(1.0, TimeUnit::Hours),
            TimeDelta::new(1.0, TimeUnit::Days)
        );
    }

    #[rstest]
    #[case(chrono::TimeDelta::days(2), 2.0, TimeUnit::Days)]
    #[case(chrono::TimeDelta::hours(36), 36.0, TimeUnit::Hours)]
    #[case(chrono::TimeDelta::minutes(90), 90.0, TimeUnit::Minutes)]
    #[case(chrono::TimeDelta::seconds(45), 45.0, TimeUnit::Seconds)]
    #[case(chrono::TimeDelta::days(365), 365.0, TimeUnit::Days)]
    fn test_from_elapsed(
        #[case] elapsed: chrono::TimeDelta,
        #[case] value: f64,
        #[case] unit: TimeUnit,
    ) {
        let time_delta = TimeDelta::from_elapsed(elapsed);
        assert_approx_eq!(f64, time_delta.value, value);
        assert_eq!(time_delta.unit, unit);
    }

    #[test]
    fn test_hours_normalisation() {
        assert_approx_eq!(f64, TimeDelta::new(2.0, TimeUnit::Days).hours().value(), 48.0);
        assert_approx_eq!(
            f64,
            TimeDelta::new(30.0, TimeUnit::Minutes).hours().value(),
            0.5
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeDelta::new(2.0, TimeUnit::Days).to_string(), "2 day");
        assert_eq!(TimeDelta::default().to_string(), "1 hr");
    }
}
