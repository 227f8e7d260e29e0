use tracing::trace;

use crate::date::holidaydate::HolidayDate;
use crate::holiday::holidayid::HolidayId;
use crate::time::calendar::holidaycalendar::HolidayCalendar;

/// Default holiday resolution: scan the date's year in the calendar and
/// return the first holiday occurring on it.
///
/// A recurring occurrence (`dd/mm`) matches the date's `dd/mm`; a one-off
/// occurrence (`dd/mm/yyyy`) also has to match its year. The scan stops at
/// the first match, so when two holidays share a day the one enumerated
/// first wins.
pub struct FallbackMatcher;

impl FallbackMatcher {
    pub fn resolve(date: &dyn HolidayDate, calendar: &dyn HolidayCalendar) -> Option<HolidayId> {
        let day_month = date.day_month();
        let year = date.year();
        let day_month_year = format!("{}/{}", day_month, year);

        let found = calendar.year_holidays(year).find_map(|(id, occurrence)| {
            let target = if occurrence.is_one_off() {
                &day_month_year
            } else {
                &day_month
            };
            (occurrence.as_str() == target.as_str()).then_some(id)
        });
        trace!(date = %day_month_year, holiday = ?found, "fallback holiday match");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::calendar::holidaycalendar::YearHolidays;
    use crate::time::calendar::occurrence::Occurrence;
    use crate::time::calendar::simplecalendar::SimpleCalendar;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed list of pairs that counts how many it handed out.
    struct ListCalendar {
        pairs: Vec<(&'static str, &'static str)>,
        pulled: AtomicUsize
    }

    impl ListCalendar {
        fn new(pairs: Vec<(&'static str, &'static str)>) -> ListCalendar {
            ListCalendar { pairs, pulled: AtomicUsize::new(0) }
        }
    }

    impl HolidayCalendar for ListCalendar {
        fn year_holidays(&self, _year: i32) -> YearHolidays<'_> {
            Box::new(self.pairs.iter().map(move |(id, o)| {
                self.pulled.fetch_add(1, Ordering::Relaxed);
                (HolidayId::new(*id), Occurrence::new(*o))
            }))
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn finds_recurring_holiday() {
        let cal = ListCalendar::new(vec![("newyear", "01/01"), ("xmas", "25/12")]);
        assert_eq!(FallbackMatcher::resolve(&ymd(2024, 1, 1), &cal), Some(HolidayId::new("newyear")));
        assert_eq!(FallbackMatcher::resolve(&ymd(2024, 12, 25), &cal), Some(HolidayId::new("xmas")));
        assert_eq!(FallbackMatcher::resolve(&ymd(2024, 3, 1), &cal), None);
    }

    #[test]
    fn one_off_only_matches_its_year() {
        let cal = ListCalendar::new(vec![("special", "25/12/2030")]);
        assert_eq!(FallbackMatcher::resolve(&ymd(2030, 12, 25), &cal), Some(HolidayId::new("special")));
        assert_eq!(FallbackMatcher::resolve(&ymd(2031, 12, 25), &cal), None);
    }

    #[test]
    fn first_match_wins_and_stops() {
        let cal = ListCalendar::new(vec![("a", "04/07"), ("b", "04/07"), ("c", "05/07")]);
        assert_eq!(FallbackMatcher::resolve(&ymd(2024, 7, 4), &cal), Some(HolidayId::new("a")));
        assert_eq!(cal.pulled.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn empty_identifier_is_still_a_holiday() {
        let cal = ListCalendar::new(vec![("", "14/07")]);
        assert_eq!(FallbackMatcher::resolve(&ymd(2024, 7, 14), &cal), Some(HolidayId::new("")));
    }

    #[test]
    fn one_off_year_is_compared_unpadded() {
        let cal = ListCalendar::new(vec![("early", "01/01/999")]);
        assert_eq!(FallbackMatcher::resolve(&ymd(999, 1, 1), &cal), Some(HolidayId::new("early")));
        assert_eq!(FallbackMatcher::resolve(&ymd(1999, 1, 1), &cal), None);
    }

    #[test]
    fn simple_calendar_one_offs_outside_four_digit_years() {
        let cal = SimpleCalendar::new(
            Vec::new(),
            vec![(HolidayId::new("ancient"), ymd(-5, 6, 3)), (HolidayId::new("early"), ymd(999, 1, 1))]
        );
        assert_eq!(FallbackMatcher::resolve(&ymd(-5, 6, 3), &cal), Some(HolidayId::new("ancient")));
        assert_eq!(FallbackMatcher::resolve(&ymd(999, 1, 1), &cal), Some(HolidayId::new("early")));
        assert_eq!(FallbackMatcher::resolve(&ymd(5, 6, 3), &cal), None);
    }
}
