//! Days of the week, clock times and the fixed time-of-day bands that
//! services are scheduled against.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use strum::{EnumIter, IntoEnumIterator};

/// One of the seven days of the week, numbered Monday = 1 through Sunday = 7
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum Day {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Day {
    /// Position in the week, Monday = 1
    pub const fn sequence(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Two-letter label used in compact listings ("Mo", "Tu", ...)
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..2]
    }

    pub fn from_sequence(sequence: u8) -> Option<Self> {
        Day::iter().find(|d| d.sequence() == sequence)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

/// Compact set of days a service runs on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DaySet {
    flags: u8,
}

impl DaySet {
    pub const EMPTY: DaySet = DaySet { flags: 0 };
    pub const WEEKDAYS: DaySet = DaySet { flags: 0b0011_1110 };
    pub const SATURDAYS: DaySet = DaySet::of(Day::Saturday);
    pub const SUNDAYS: DaySet = DaySet::of(Day::Sunday);
    pub const WEEKENDS: DaySet = DaySet { flags: 0b1100_0000 };

    pub const fn of(day: Day) -> Self {
        Self { flags: 1 << day.sequence() }
    }

    pub fn insert(&mut self, day: Day) {
        self.flags |= 1 << day.sequence();
    }

    pub fn remove(&mut self, day: Day) {
        self.flags &= !(1 << day.sequence());
    }

    pub fn contains(&self, day: Day) -> bool {
        (self.flags & (1 << day.sequence())) != 0
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday().into())
    }

    pub fn is_empty(&self) -> bool {
        self.flags == 0
    }

    pub fn len(&self) -> usize {
        self.flags.count_ones() as usize
    }

    /// Days in week order
    pub fn iter(&self) -> impl Iterator<Item = Day> + '_ {
        Day::iter().filter(move |d| self.contains(*d))
    }

    pub fn min_sequence(&self) -> Option<u8> {
        self.iter().map(Day::sequence).min()
    }

    pub fn max_sequence(&self) -> Option<u8> {
        self.iter().map(Day::sequence).max()
    }

    /// `(min, max)` day sequence with an empty set reported as
    /// `(i32::MAX, -1)`, so it never encloses nor is enclosed strictly by
    /// itself but is enclosed by every non-empty set.
    pub(crate) fn sequence_bounds(&self) -> (i32, i32) {
        (
            self.min_sequence().map_or(i32::MAX, i32::from),
            self.max_sequence().map_or(-1, i32::from),
        )
    }
}

impl FromIterator<Day> for DaySet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut set = DaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", day)?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of the containment comparison on [`TimePeriod`] and
/// [`Period`](crate::models::period::Period).
///
/// Not an ordering: `a.nesting(b) == Disjoint` says
/// nothing about `b.nesting(a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nesting {
    Same,
    Nested,
    Disjoint,
}

impl Nesting {
    /// Integer form (`0`, `1`, `-1`) used by legacy comparison callers
    pub const fn signum(self) -> i32 {
        match self {
            Nesting::Same => 0,
            Nesting::Nested => 1,
            Nesting::Disjoint => -1,
        }
    }
}

/// Wall-clock time on a 24-hour clock. `24:00:00` is allowed as an end bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl Time {
    pub const MIDNIGHT: Time = Time::new(0, 0, 0);
    pub const END_OF_DAY: Time = Time::new(24, 0, 0);

    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub const fn hm(hours: u8, minutes: u8) -> Self {
        Self::new(hours, minutes, 0)
    }

    pub const fn hours(&self) -> u8 {
        self.hours
    }

    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }
}

impl From<NaiveTime> for Time {
    fn from(time: NaiveTime) -> Self {
        Time::new(time.hour() as u8, time.minute() as u8, time.second() as u8)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Band of the day between two times
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimePeriod {
    start: Time,
    end: Time,
}

impl TimePeriod {
    pub const EARLY: TimePeriod = TimePeriod::new(Time::MIDNIGHT, Time::hm(6, 0));
    pub const MORNING_RUSH: TimePeriod = TimePeriod::new(Time::hm(6, 0), Time::hm(9, 0));
    pub const BASE: TimePeriod = TimePeriod::new(Time::hm(9, 0), Time::hm(15, 0));
    pub const EVENING_RUSH: TimePeriod = TimePeriod::new(Time::hm(15, 0), Time::hm(18, 0));
    pub const LATE: TimePeriod = TimePeriod::new(Time::hm(18, 0), Time::END_OF_DAY);

    /// The fixed bands in day order; together they cover the day without gaps
    pub const ALL: [TimePeriod; 5] = [
        TimePeriod::EARLY,
        TimePeriod::MORNING_RUSH,
        TimePeriod::BASE,
        TimePeriod::EVENING_RUSH,
        TimePeriod::LATE,
    ];

    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> Time {
        self.start
    }

    pub const fn end(&self) -> Time {
        self.end
    }

    /// `Nested` when `self` starts strictly earlier and ends strictly later
    /// than `other`.
    pub fn nesting(&self, other: &TimePeriod) -> Nesting {
        if self.start == other.start && self.end == other.end {
            Nesting::Same
        } else if self.start < other.start && self.end > other.end {
            Nesting::Nested
        } else {
            Nesting::Disjoint
        }
    }

    /// Half-open `[start, end)` membership
    pub fn contains_time(&self, time: Time) -> bool {
        self.start <= time && time < self.end
    }

    /// The fixed band containing `time`
    pub fn band_of(time: Time) -> Option<TimePeriod> {
        TimePeriod::ALL.into_iter().find(|tp| tp.contains_time(time))
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_sequence_and_names() {
        assert_eq!(Day::Monday.sequence(), 1);
        assert_eq!(Day::Sunday.sequence(), 7);
        assert_eq!(Day::Wednesday.abbreviation(), "We");
        assert_eq!(Day::from_sequence(6), Some(Day::Saturday));
        assert_eq!(Day::from_sequence(0), None);
    }

    #[test]
    fn test_day_weekday_conversion() {
        for day in Day::iter() {
            let weekday: Weekday = day.into();
            assert_eq!(Day::from(weekday), day);
            assert_eq!(weekday.number_from_monday() as u8, day.sequence());
        }
    }

    #[test]
    fn test_day_set_constants() {
        assert_eq!(DaySet::WEEKDAYS.len(), 5);
        assert!(DaySet::WEEKDAYS.contains(Day::Monday));
        assert!(DaySet::WEEKDAYS.contains(Day::Friday));
        assert!(!DaySet::WEEKDAYS.contains(Day::Saturday));
        assert_eq!(
            DaySet::WEEKENDS,
            [Day::Saturday, Day::Sunday].into_iter().collect::<DaySet>()
        );
        assert_eq!(DaySet::SUNDAYS.min_sequence(), Some(7));
        assert_eq!(DaySet::EMPTY.max_sequence(), None);
        assert_eq!(DaySet::EMPTY.sequence_bounds(), (i32::MAX, -1));
    }

    #[test]
    fn test_day_set_mutation() {
        let mut set = DaySet::EMPTY;
        set.insert(Day::Tuesday);
        set.insert(Day::Thursday);
        assert_eq!(set.len(), 2);
        set.remove(Day::Tuesday);
        assert!(!set.contains(Day::Tuesday));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Day::Thursday]);
    }

    #[test]
    fn test_day_set_contains_date() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert!(DaySet::SATURDAYS.contains_date(saturday));
        assert!(!DaySet::WEEKDAYS.contains_date(saturday));
    }

    #[test]
    fn test_time_ordering() {
        assert!(Time::new(6, 0, 0) < Time::new(6, 0, 1));
        assert!(Time::new(5, 59, 59) < Time::new(6, 0, 0));
        assert!(Time::new(23, 0, 0) < Time::END_OF_DAY);
        assert_eq!(Time::hm(9, 30).seconds_since_midnight(), 34_200);
        assert_eq!(Time::hm(9, 5).to_string(), "09:05");
    }

    #[test]
    fn test_fixed_bands_cover_day() {
        for pair in TimePeriod::ALL.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(TimePeriod::ALL[0].start(), Time::MIDNIGHT);
        assert_eq!(TimePeriod::ALL[4].end(), Time::END_OF_DAY);

        assert_eq!(TimePeriod::band_of(Time::hm(6, 0)), Some(TimePeriod::MORNING_RUSH));
        assert_eq!(TimePeriod::band_of(Time::new(23, 59, 59)), Some(TimePeriod::LATE));
        assert_eq!(TimePeriod::band_of(Time::END_OF_DAY), None);
    }

    #[test]
    fn test_time_period_nesting_is_directional() {
        let whole_day = TimePeriod::new(Time::MIDNIGHT, Time::END_OF_DAY);
        let base = TimePeriod::BASE;

        assert_eq!(base.nesting(&TimePeriod::BASE), Nesting::Same);
        assert_eq!(whole_day.nesting(&base), Nesting::Nested);
        // the reverse direction is not the mirror image
        assert_eq!(base.nesting(&whole_day), Nesting::Disjoint);
        // shared start bound is not strict enclosure
        let morning = TimePeriod::new(Time::MIDNIGHT, Time::hm(9, 0));
        assert_eq!(morning.nesting(&TimePeriod::EARLY), Nesting::Disjoint);
    }
}
