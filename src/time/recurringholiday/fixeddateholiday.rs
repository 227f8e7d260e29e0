use std::collections::HashMap;

use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use super::recurringholiday::RecurringHoliday;
use super::weekendadjustment::{
    WeekendAdjustment,
    WeekendAdjustmentRule
};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum WeekendAdjustmentShiftCheck {
    MayShiftToPreviousYear = 1,
    MayShiftToNextYear = -1,
    None
}

/// A holiday on the same month and day every year, optionally moved off
/// weekends. An adjusted date may cross into a neighbouring year, e.g.
/// 1 January observed on 31 December.
#[derive(Clone, Debug)]
pub struct FixedDateHoliday {
    month: u32,
    day: u32,
    weekend_adjustment_rules: WeekendAdjustmentRule,
    shift_check: WeekendAdjustmentShiftCheck
}

impl FixedDateHoliday {
    pub fn new(month: u32, day: u32, weekend_adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> Option<FixedDateHoliday> {
        // 29 February is allowed; it simply has no date in common years
        NaiveDate::from_ymd_opt(2000, month, day)?;

        let weekend_adjustment_rules = WeekendAdjustmentRule::new(weekend_adjustment_map);
        let n_weekend = weekend_adjustment_rules.adjustment_count();
        let shift_check = if n_weekend > 0 {
            if month == 1 && day <= n_weekend {
                WeekendAdjustmentShiftCheck::MayShiftToPreviousYear
            } else if month == 12 && day > 31 - n_weekend {
                WeekendAdjustmentShiftCheck::MayShiftToNextYear
            } else {
                WeekendAdjustmentShiftCheck::None
            }
        } else {
            WeekendAdjustmentShiftCheck::None
        };

        Some(FixedDateHoliday {
            month,
            day,
            weekend_adjustment_rules,
            shift_check
        })
    }

    pub fn unadjusted(month: u32, day: u32) -> Option<FixedDateHoliday> {
        FixedDateHoliday::new(month, day, &HashMap::new())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    fn get_holiday_impl(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .map(|d| self.weekend_adjustment_rules.adjust(d))
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn get_holiday(&self, year: i32) -> Vec<NaiveDate> {
        let mut holidays = Vec::with_capacity(2);

        if let Some(d1) = self.get_holiday_impl(year) {
            if d1.year() == year {
                holidays.push(d1);
            }
        }

        if self.shift_check != WeekendAdjustmentShiftCheck::None {
            if let Some(d2) = self.get_holiday_impl(year + self.shift_check as i32) {
                if d2.year() == year {
                    holidays.push(d2);
                }
            }
        }

        holidays.sort();
        holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_fixed_date() {
        let xmas = FixedDateHoliday::unadjusted(12, 25).unwrap();
        assert_eq!(xmas.get_holiday(2024), vec![ymd(2024, 12, 25)]);
        assert!(xmas.is_holiday(&ymd(2031, 12, 25)));
    }

    #[test]
    fn invalid_month_day_is_rejected() {
        assert!(FixedDateHoliday::unadjusted(13, 1).is_none());
        assert!(FixedDateHoliday::unadjusted(4, 31).is_none());
        assert!(FixedDateHoliday::unadjusted(2, 29).is_some());
    }

    #[test]
    fn leap_day_skips_common_years() {
        let leap = FixedDateHoliday::unadjusted(2, 29).unwrap();
        assert!(leap.get_holiday(2023).is_empty());
        assert_eq!(leap.get_holiday(2024), vec![ymd(2024, 2, 29)]);
    }

    #[test]
    fn new_year_observed_in_previous_year() {
        let mut map = HashMap::new();
        map.insert(Weekday::Sat, WeekendAdjustment::PreviousWeekday);
        map.insert(Weekday::Sun, WeekendAdjustment::NextWeekday);
        let new_year = FixedDateHoliday::new(1, 1, &map).unwrap();
        // 2022-01-01 is a Saturday, observed on Friday 2021-12-31
        assert!(new_year.get_holiday(2022).is_empty());
        assert_eq!(new_year.get_holiday(2021), vec![ymd(2021, 1, 1), ymd(2021, 12, 31)]);
    }
}
