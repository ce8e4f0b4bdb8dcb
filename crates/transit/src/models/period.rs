//! Operating periods: a set of days combined with one time-of-day band.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::models::calendar::{DaySet, Nesting, Time, TimePeriod};

/// When a [`Service`](crate::models::service::Service) operates
///
/// Equality only looks at the *bounds* of the day set (lowest and highest day
/// sequence), not at membership, so `{Mon, Fri}` equals `{Mon..Fri}` for the
/// same time band.
#[derive(Clone, Copy, Debug)]
pub struct Period {
    days: DaySet,
    time_period: TimePeriod,
}

impl Period {
    pub const WEEKDAY_EARLY: Period = Period::new(DaySet::WEEKDAYS, TimePeriod::EARLY);
    pub const WEEKDAY_MORNING_RUSH: Period = Period::new(DaySet::WEEKDAYS, TimePeriod::MORNING_RUSH);
    pub const WEEKDAY_BASE: Period = Period::new(DaySet::WEEKDAYS, TimePeriod::BASE);
    pub const WEEKDAY_EVENING_RUSH: Period = Period::new(DaySet::WEEKDAYS, TimePeriod::EVENING_RUSH);
    pub const WEEKDAY_LATE: Period = Period::new(DaySet::WEEKDAYS, TimePeriod::LATE);

    pub const SATURDAY_EARLY: Period = Period::new(DaySet::SATURDAYS, TimePeriod::EARLY);
    pub const SATURDAY_MORNING_RUSH: Period = Period::new(DaySet::SATURDAYS, TimePeriod::MORNING_RUSH);
    pub const SATURDAY_BASE: Period = Period::new(DaySet::SATURDAYS, TimePeriod::BASE);
    pub const SATURDAY_EVENING_RUSH: Period = Period::new(DaySet::SATURDAYS, TimePeriod::EVENING_RUSH);
    pub const SATURDAY_LATE: Period = Period::new(DaySet::SATURDAYS, TimePeriod::LATE);

    pub const SUNDAY_EARLY: Period = Period::new(DaySet::SUNDAYS, TimePeriod::EARLY);
    pub const SUNDAY_MORNING_RUSH: Period = Period::new(DaySet::SUNDAYS, TimePeriod::MORNING_RUSH);
    pub const SUNDAY_BASE: Period = Period::new(DaySet::SUNDAYS, TimePeriod::BASE);
    pub const SUNDAY_EVENING_RUSH: Period = Period::new(DaySet::SUNDAYS, TimePeriod::EVENING_RUSH);
    pub const SUNDAY_LATE: Period = Period::new(DaySet::SUNDAYS, TimePeriod::LATE);

    pub const fn new(days: DaySet, time_period: TimePeriod) -> Self {
        Self { days, time_period }
    }

    pub const fn days(&self) -> DaySet {
        self.days
    }

    pub const fn time_period(&self) -> TimePeriod {
        self.time_period
    }

    /// Containment comparison against `other`.
    ///
    /// - `Same`: identical day bounds and the time bands compare `Same`.
    /// - identical day bounds, different bands: the band comparison decides,
    ///   which reports `Nested` when *self's* band is the wider one.
    /// - `Nested`: *other's* day bounds strictly enclose self's.
    /// - `Disjoint`: everything else.
    pub fn nesting(&self, other: &Period) -> Nesting {
        let (this_min, this_max) = self.days.sequence_bounds();
        let (other_min, other_max) = other.days.sequence_bounds();

        if this_min == other_min && this_max == other_max {
            self.time_period.nesting(&other.time_period)
        } else if other_min < this_min && other_max > this_max {
            Nesting::Nested
        } else {
            Nesting::Disjoint
        }
    }

    /// Whether a moment falls on one of the days and inside the time band
    pub fn covers(&self, at: NaiveDateTime) -> bool {
        self.days.contains(at.date().weekday().into()) && self.time_period.contains_time(Time::from(at.time()))
    }

    /// Parse the two-letter interchange codes, e.g. `("WK", "BS")`
    pub fn from_codes(days: &str, time: &str) -> Option<Period> {
        let days = match days {
            "WK" => DaySet::WEEKDAYS,
            "SA" => DaySet::SATURDAYS,
            "SU" => DaySet::SUNDAYS,
            _ => return None,
        };
        let time_period = match time {
            "EA" => TimePeriod::EARLY,
            "AM" => TimePeriod::MORNING_RUSH,
            "BS" => TimePeriod::BASE,
            "PM" => TimePeriod::EVENING_RUSH,
            "NI" => TimePeriod::LATE,
            _ => return None,
        };
        Some(Period::new(days, time_period))
    }

    /// Interchange codes for this period, if it is one of the coded combinations
    pub fn codes(&self) -> Option<(&'static str, &'static str)> {
        let days = match self.days {
            DaySet::WEEKDAYS => "WK",
            DaySet::SATURDAYS => "SA",
            DaySet::SUNDAYS => "SU",
            _ => return None,
        };
        let time = match self.time_period {
            TimePeriod::EARLY => "EA",
            TimePeriod::MORNING_RUSH => "AM",
            TimePeriod::BASE => "BS",
            TimePeriod::EVENING_RUSH => "PM",
            TimePeriod::LATE => "NI",
            _ => return None,
        };
        Some((days, time))
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.nesting(other) == Nesting::Same
    }
}

impl Eq for Period {}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}   {}", self.days, self.time_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::Day;
    use chrono::NaiveDate;

    #[test]
    fn test_period_equality() {
        assert_eq!(Period::WEEKDAY_BASE, Period::new(DaySet::WEEKDAYS, TimePeriod::BASE));
        assert_ne!(Period::WEEKDAY_BASE, Period::SATURDAY_BASE);
        assert_ne!(Period::WEEKDAY_BASE, Period::WEEKDAY_LATE);
    }

    #[test]
    fn test_period_equality_uses_day_bounds_only() {
        // Monday and Friday alone share the bounds of the full working week
        let ends_of_week: DaySet = [Day::Monday, Day::Friday].into_iter().collect();
        let sparse = Period::new(ends_of_week, TimePeriod::BASE);
        assert_eq!(sparse, Period::WEEKDAY_BASE);
    }

    #[test]
    fn test_period_nesting_on_days() {
        let midweek: DaySet = [Day::Tuesday, Day::Wednesday, Day::Thursday].into_iter().collect();
        let midweek_base = Period::new(midweek, TimePeriod::BASE);

        assert_eq!(midweek_base.nesting(&Period::WEEKDAY_BASE), Nesting::Nested);
        assert_eq!(Period::WEEKDAY_BASE.nesting(&midweek_base), Nesting::Disjoint);
        // day enclosure ignores the time band entirely
        assert_eq!(midweek_base.nesting(&Period::WEEKDAY_LATE), Nesting::Nested);
    }

    #[test]
    fn test_period_nesting_falls_back_to_time_direction() {
        let all_day = Period::new(DaySet::WEEKDAYS, TimePeriod::new(Time::MIDNIGHT, Time::END_OF_DAY));

        // with equal day bounds the wider band on *self* is reported as nested,
        // the opposite direction to the day comparison above
        assert_eq!(all_day.nesting(&Period::WEEKDAY_BASE), Nesting::Nested);
        assert_eq!(Period::WEEKDAY_BASE.nesting(&all_day), Nesting::Disjoint);
        assert_eq!(all_day.nesting(&Period::WEEKDAY_BASE).signum(), 1);
    }

    #[test]
    fn test_empty_day_set_is_enclosed_by_any_days() {
        let nothing = Period::new(DaySet::EMPTY, TimePeriod::BASE);
        assert_eq!(nothing.nesting(&Period::SUNDAY_BASE), Nesting::Nested);
        assert_eq!(Period::SUNDAY_BASE.nesting(&nothing), Nesting::Disjoint);
        assert_eq!(nothing, Period::new(DaySet::EMPTY, TimePeriod::BASE));
    }

    #[test]
    fn test_period_covers() {
        let tuesday_ten = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert!(Period::WEEKDAY_BASE.covers(tuesday_ten));
        assert!(!Period::WEEKDAY_LATE.covers(tuesday_ten));
        assert!(!Period::SATURDAY_BASE.covers(tuesday_ten));

        let tuesday_nine = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert!(Period::WEEKDAY_BASE.covers(tuesday_nine));
        assert!(!Period::WEEKDAY_MORNING_RUSH.covers(tuesday_nine));
    }

    #[test]
    fn test_period_codes() {
        assert_eq!(Period::from_codes("WK", "BS"), Some(Period::WEEKDAY_BASE));
        assert_eq!(Period::from_codes("SU", "NI"), Some(Period::SUNDAY_LATE));
        assert_eq!(Period::from_codes("XX", "BS"), None);
        assert_eq!(Period::from_codes("SA", "ZZ"), None);

        assert_eq!(Period::SATURDAY_MORNING_RUSH.codes(), Some(("SA", "AM")));
        assert_eq!(Period::new(DaySet::WEEKENDS, TimePeriod::BASE).codes(), None);
    }
}
