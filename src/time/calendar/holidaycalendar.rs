use chrono::{Datelike, NaiveDate};

use crate::holiday::holidayid::HolidayId;
use crate::time::calendar::occurrence::Occurrence;

/// Lazy, finite sequence of a year's holidays in declaration order.
pub type YearHolidays<'a> = Box<dyn Iterator<Item = (HolidayId, Occurrence)> + 'a>;

/// A region's holiday calendar, seen as a per-year enumerator.
///
/// Every call to `year_holidays` starts a fresh sequence, so callers may
/// stop early and ask again.
pub trait HolidayCalendar: Send + Sync {
    fn year_holidays(&self, year: i32) -> YearHolidays<'_>;

    /// The year's holidays with concrete dates. One-off holidays of other
    /// years are left out.
    fn holiday_dates(&self, year: i32) -> Vec<(HolidayId, NaiveDate)> {
        self.year_holidays(year)
            .filter_map(|(id, occurrence)| {
                occurrence_date(&occurrence, year)
                    .filter(|d| d.year() == year)
                    .map(|d| (id, d))
            })
            .collect()
    }
}

/// The date an occurrence stands for; recurring ones are placed in `year`.
fn occurrence_date(occurrence: &Occurrence, year: i32) -> Option<NaiveDate> {
    let mut parts = occurrence.as_str().splitn(3, '/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year = match parts.next() {
        Some(y) => y.parse().ok()?,
        None => year
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
