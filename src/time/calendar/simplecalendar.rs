use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::holiday::holidayid::HolidayId;
use crate::time::calendar::holidaycalendar::{HolidayCalendar, YearHolidays};
use crate::time::calendar::occurrence::Occurrence;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

/// A region built from recurring holiday rules plus one-off dated holidays.
pub struct SimpleCalendar {
    recurring_holidays: Vec<(HolidayId, Arc<dyn RecurringHoliday>)>,
    additional_holidays: Vec<(HolidayId, NaiveDate)>
}

impl SimpleCalendar {
    /// Creates a new SimpleCalendar.
    ///
    /// # Arguments
    /// * `recurring_holidays` - Rules yielding a `dd/mm` occurrence each year
    /// * `additional_holidays` - One-time holidays yielding `dd/mm/yyyy`
    pub fn new(
        recurring_holidays: Vec<(HolidayId, Arc<dyn RecurringHoliday>)>,
        additional_holidays: Vec<(HolidayId, NaiveDate)>
    ) -> SimpleCalendar {
        SimpleCalendar {
            recurring_holidays,
            additional_holidays
        }
    }

    pub fn recurring_holidays(&self) -> &[(HolidayId, Arc<dyn RecurringHoliday>)] {
        &self.recurring_holidays
    }

    pub fn additional_holidays(&self) -> &[(HolidayId, NaiveDate)] {
        &self.additional_holidays
    }
}

impl HolidayCalendar for SimpleCalendar {
    /// Rules are evaluated one at a time as the sequence is consumed, then
    /// the one-off holidays follow. One-offs of every year are listed; the
    /// year in their occurrence tells them apart.
    fn year_holidays(&self, year: i32) -> YearHolidays<'_> {
        let recurring = self.recurring_holidays
            .iter()
            .flat_map(move |(id, rule)| {
                rule.get_holiday(year)
                    .into_iter()
                    .filter(move |d| d.year() == year)
                    .map(move |d| (id.clone(), Occurrence::recurring(d)))
            });
        let additional = self.additional_holidays
            .iter()
            .map(|(id, d)| (id.clone(), Occurrence::one_off(*d)));
        Box::new(recurring.chain(additional))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
    use crate::time::recurringholiday::nthweekdayholiday::NthWeekdayHoliday;
    use chrono::Weekday;

    fn calendar() -> SimpleCalendar {
        let new_year: Arc<dyn RecurringHoliday> = Arc::new(FixedDateHoliday::unadjusted(1, 1).unwrap());
        let thanksgiving: Arc<dyn RecurringHoliday> = Arc::new(NthWeekdayHoliday::new(11, 4, Weekday::Thu).unwrap());
        SimpleCalendar::new(
            vec![
                (HolidayId::new("new-year"), new_year),
                (HolidayId::new("thanksgiving"), thanksgiving),
            ],
            vec![(HolidayId::new("jubilee"), NaiveDate::from_ymd_opt(2030, 6, 3).unwrap())]
        )
    }

    #[test]
    fn enumerates_in_declaration_order() {
        let pairs: Vec<(String, String)> = calendar()
            .year_holidays(2024)
            .map(|(id, o)| (id.into_inner(), o.to_string()))
            .collect();
        assert_eq!(pairs, vec![
            ("new-year".to_owned(), "01/01".to_owned()),
            ("thanksgiving".to_owned(), "28/11".to_owned()),
            ("jubilee".to_owned(), "03/06/2030".to_owned()),
        ]);
    }

    #[test]
    fn holiday_dates_drop_other_years() {
        let dates = calendar().holiday_dates(2024);
        assert_eq!(dates.len(), 2);
        let dates_2030 = calendar().holiday_dates(2030);
        assert!(dates_2030.contains(&(HolidayId::new("jubilee"), NaiveDate::from_ymd_opt(2030, 6, 3).unwrap())));
    }

    #[test]
    fn enumeration_is_restartable() {
        let cal = calendar();
        let first = cal.year_holidays(2024).next();
        let again = cal.year_holidays(2024).next();
        assert_eq!(first, again);
    }
}
