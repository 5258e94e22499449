//! Calendar arithmetic for visit scheduling.
//!
//! Sundays are not working days for the sales team, so elapsed time between
//! visits is measured in days excluding Sundays.

use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, Utc, Weekday};

use crate::domain::types::VisitDay;

/// Counts the days `d` with `start <= d < end` that are not Sundays.
///
/// Returns zero when `start` is on or after `end`.
pub fn count_days_excluding_sundays(start: NaiveDate, end: NaiveDate) -> u32 {
    if start >= end {
        return 0;
    }
    let total = (end - start).num_days();
    let full_weeks = total / 7;
    let remainder = total % 7;

    // Every full week holds exactly one Sunday; the remainder starts on the
    // same weekday as `start`.
    let mut days = full_weeks * 6;
    let mut weekday = start.weekday();
    for _ in 0..remainder {
        if weekday != Weekday::Sun {
            days += 1;
        }
        weekday = weekday.succ();
    }
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Reference day plus the UTC offset used to read API timestamps as local
/// calendar dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calendar {
    today: NaiveDate,
    offset: FixedOffset,
}

impl Calendar {
    pub fn new(today: NaiveDate, offset: FixedOffset) -> Self {
        Self { today, offset }
    }

    /// Calendar anchored on the system clock and local time zone.
    pub fn local() -> Self {
        let now = Local::now();
        Self {
            today: now.date_naive(),
            offset: *now.offset(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today
            .checked_add_days(Days::new(1))
            .unwrap_or(self.today)
    }

    pub fn today_weekday(&self) -> VisitDay {
        VisitDay::from_weekday(self.today.weekday())
    }

    pub fn tomorrow_weekday(&self) -> VisitDay {
        VisitDay::from_weekday(self.tomorrow().weekday())
    }

    /// Local calendar date of an API timestamp.
    pub fn local_date(&self, timestamp: &DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.offset).date_naive()
    }

    /// Days since `date` up to today, Sundays excluded.
    pub fn days_since(&self, date: NaiveDate) -> u32 {
        count_days_excluding_sundays(date, self.today)
    }

    /// Days since the local date of `timestamp` up to today, Sundays excluded.
    pub fn days_since_timestamp(&self, timestamp: &DateTime<Utc>) -> u32 {
        self.days_since(self.local_date(timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn naive_count(start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .take_while(|d| *d < end)
            .filter(|d| d.weekday() != Weekday::Sun)
            .count() as u32
    }

    #[test]
    fn empty_and_inverted_ranges_count_zero() {
        let d = date(2024, 5, 6);
        assert_eq!(count_days_excluding_sundays(d, d), 0);
        assert_eq!(count_days_excluding_sundays(date(2024, 5, 10), d), 0);
    }

    #[test]
    fn full_week_counts_six() {
        // 2024-05-06 is a Monday.
        assert_eq!(count_days_excluding_sundays(date(2024, 5, 6), date(2024, 5, 13)), 6);
        assert_eq!(count_days_excluding_sundays(date(2024, 5, 5), date(2024, 5, 12)), 6);
    }

    #[test]
    fn starting_on_sunday_skips_it() {
        // Sunday -> Monday: the only day in range is the Sunday itself.
        assert_eq!(count_days_excluding_sundays(date(2024, 5, 5), date(2024, 5, 6)), 0);
        // Saturday -> Monday: Saturday counts, Sunday does not.
        assert_eq!(count_days_excluding_sundays(date(2024, 5, 4), date(2024, 5, 6)), 1);
    }

    #[test]
    fn matches_day_by_day_count() {
        let base = date(2024, 1, 1);
        for offset in 0..21 {
            let start = base + chrono::Duration::days(offset);
            for len in 0..40 {
                let end = start + chrono::Duration::days(len);
                assert_eq!(
                    count_days_excluding_sundays(start, end),
                    naive_count(start, end),
                    "start={start} end={end}"
                );
            }
        }
    }

    #[test]
    fn local_date_uses_offset() {
        let cal = Calendar::new(date(2024, 5, 10), FixedOffset::west_opt(6 * 3600).unwrap());
        let late_utc = DateTime::parse_from_rfc3339("2024-05-10T03:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(cal.local_date(&late_utc), date(2024, 5, 9));
        assert_eq!(cal.days_since_timestamp(&late_utc), 1);
    }

    #[test]
    fn tomorrow_weekday_rolls_over() {
        // 2024-05-11 is a Saturday.
        let cal = Calendar::new(date(2024, 5, 11), FixedOffset::east_opt(0).unwrap());
        assert_eq!(cal.today_weekday(), VisitDay::Saturday);
        assert_eq!(cal.tomorrow(), date(2024, 5, 12));
        assert_eq!(cal.tomorrow_weekday(), VisitDay::Sunday);
    }
}
