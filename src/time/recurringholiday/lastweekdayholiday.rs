use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::recurringholiday::RecurringHoliday;

/// The last given weekday of a month, e.g. the last Monday of May.
#[derive(Clone, Debug)]
pub struct LastWeekdayHoliday {
    month: u32,
    weekday: Weekday,
}

impl LastWeekdayHoliday {
    pub fn new(month: u32, weekday: Weekday) -> Option<LastWeekdayHoliday> {
        if !(1..=12).contains(&month) {
            None
        } else {
            Some(LastWeekdayHoliday { month, weekday })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for LastWeekdayHoliday {
    fn get_holiday(&self, year: i32) -> Vec<NaiveDate> {
        let first_of_next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, self.month + 1, 1)
        };
        let Some(first_of_next_month) = first_of_next_month else {
            return Vec::new();
        };

        let days_back = ((first_of_next_month.weekday().num_days_from_monday() as i32
                         - self.weekday.num_days_from_monday() as i32 + 7) % 7) as u64;
        // same weekday as the 1st: go back a full week
        let days_back = if days_back == 0 { 7 } else { days_back };

        first_of_next_month
            .checked_sub_days(Days::new(days_back))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memorial_day() {
        let memorial = LastWeekdayHoliday::new(5, Weekday::Mon).unwrap();
        assert_eq!(memorial.get_holiday(2024), vec![NaiveDate::from_ymd_opt(2024, 5, 27).unwrap()]);
    }

    #[test]
    fn december_wraps_to_next_year() {
        let last_friday = LastWeekdayHoliday::new(12, Weekday::Fri).unwrap();
        assert_eq!(last_friday.get_holiday(2024), vec![NaiveDate::from_ymd_opt(2024, 12, 27).unwrap()]);
    }
}
