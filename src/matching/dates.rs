//! Year-month parsing, the reference clock, recency decay and total experience

use crate::config::RecencyConfig;
use crate::model::CandidateProfile;
use chrono::{Datelike, NaiveDate, Utc};
use std::fmt;

/// A calendar month, parsed from `yyyy-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Strict `yyyy-MM`. Surrounding whitespace, single-digit months and
    /// trailing day components are all rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().all(|b| b.is_ascii_digit()) || !month.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Signed whole months from `self` to `other`
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        let from = self.year as i64 * 12 + self.month as i64;
        let to = other.year as i64 * 12 + other.month as i64;
        to - from
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Source of "now" for every time-dependent score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceClock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl ReferenceClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            ReferenceClock::System => Utc::now().date_naive(),
            ReferenceClock::Fixed(date) => *date,
        }
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today())
    }

    pub fn timestamp(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// Linear decay from 1.0 for an experience that just ended down to a floor
#[derive(Debug, Clone, Copy)]
pub struct RecencyDecay {
    horizon_years: f64,
    floor: f64,
}

impl RecencyDecay {
    pub const UNPARSABLE: f64 = 0.5;

    pub fn new(config: &RecencyConfig) -> Self {
        Self {
            horizon_years: config.horizon_years,
            floor: config.floor,
        }
    }

    pub fn score(&self, end: Option<&str>, now: YearMonth) -> f64 {
        let Some(end) = end else {
            return Self::UNPARSABLE;
        };
        if end.eq_ignore_ascii_case("present") {
            return 1.0;
        }

        match YearMonth::parse(end) {
            Some(ended) => self.decay(ended.months_until(&now) as f64 / 12.0),
            None => Self::UNPARSABLE,
        }
    }

    pub fn decay(&self, years_ago: f64) -> f64 {
        if years_ago <= 0.0 {
            1.0
        } else if years_ago >= self.horizon_years {
            self.floor
        } else {
            1.0 - (years_ago / self.horizon_years) * (1.0 - self.floor)
        }
    }
}

impl Default for RecencyDecay {
    fn default() -> Self {
        Self {
            horizon_years: 5.0,
            floor: 0.2,
        }
    }
}

/// Years from the earliest parseable start to `now`; 0.0 when no start parses
pub fn total_years(profile: &CandidateProfile, now: YearMonth) -> f64 {
    profile
        .experiences
        .iter()
        .filter_map(|exp| exp.start.as_deref().and_then(YearMonth::parse))
        .min()
        .map(|earliest| earliest.months_until(&now) as f64 / 12.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Experience;

    fn ym(value: &str) -> YearMonth {
        YearMonth::parse(value).unwrap()
    }

    #[test]
    fn test_parse_accepts_only_strict_year_month() {
        assert_eq!(ym("2021-03"), YearMonth::new(2021, 3).unwrap());
        assert!(YearMonth::parse("2021-3").is_none());
        assert!(YearMonth::parse(" 2021-03").is_none());
        assert!(YearMonth::parse("2021-13").is_none());
        assert!(YearMonth::parse("2021-00").is_none());
        assert!(YearMonth::parse("2021-03-01").is_none());
        assert!(YearMonth::parse("21-03").is_none());
        assert!(YearMonth::parse("present").is_none());
        assert!(YearMonth::parse("").is_none());
    }

    #[test]
    fn test_months_until_is_signed() {
        assert_eq!(ym("2020-11").months_until(&ym("2021-02")), 3);
        assert_eq!(ym("2021-02").months_until(&ym("2020-11")), -3);
        assert_eq!(ym("2021-02").to_string(), "2021-02");
    }

    #[test]
    fn test_recency_decay_boundaries() {
        let decay = RecencyDecay::default();
        let now = ym("2024-06");

        assert_eq!(decay.score(Some("present"), now), 1.0);
        assert_eq!(decay.score(Some("PRESENT"), now), 1.0);
        assert_eq!(decay.score(Some("2024-06"), now), 1.0);
        assert_eq!(decay.score(Some("2025-01"), now), 1.0);
        assert_eq!(decay.score(Some("2019-06"), now), 0.2);
        assert_eq!(decay.score(Some("2014-06"), now), 0.2);
        assert_eq!(decay.score(Some("June 2020"), now), 0.5);
        assert_eq!(decay.score(None, now), 0.5);
    }

    #[test]
    fn test_recency_decay_is_linear_inside_horizon() {
        let decay = RecencyDecay::default();
        let score = decay.score(Some("2022-06"), ym("2024-06"));
        assert!((score - 0.68).abs() < 1e-12);
    }

    #[test]
    fn test_recency_decay_never_increases_with_age() {
        let decay = RecencyDecay::default();
        let mut previous = f64::MAX;
        for months in 0..=120 {
            let score = decay.decay(months as f64 / 12.0);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_total_years_from_earliest_parseable_start() {
        let profile = CandidateProfile::new("Ada", "Engineer")
            .with_experience(Experience::new("A", "Dev").period("2020-06", "present"))
            .with_experience(Experience::new("B", "Dev").period("2018-06", "2020-05"))
            .with_experience(Experience::new("C", "Dev").period("sometime", "2018-01"));

        assert_eq!(total_years(&profile, ym("2024-06")), 6.0);
    }

    #[test]
    fn test_total_years_without_parseable_start() {
        let profile = CandidateProfile::new("Ada", "Engineer")
            .with_experience(Experience::new("A", "Dev").period("unknown", "present"));
        assert_eq!(total_years(&profile, ym("2024-06")), 0.0);
        assert_eq!(total_years(&CandidateProfile::default(), ym("2024-06")), 0.0);
    }

    #[test]
    fn test_fixed_clock_timestamp() {
        let clock = ReferenceClock::Fixed(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(clock.timestamp(), "2024-06-01");
        assert_eq!(clock.current_month(), ym("2024-06"));
    }
}
