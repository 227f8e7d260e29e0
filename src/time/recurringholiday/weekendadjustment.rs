use std::collections::HashMap;

use chrono::{
    Datelike,
    Duration,
    NaiveDate,
    Weekday
};
use serde::{
    Serialize,
    Deserialize
};


#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum WeekendAdjustment {
    Unadjusted = 0,
    NextWeekday = 1,
    PreviousWeekday = -1
}

/// Observed-day rule for a fixed-date holiday falling on a weekend.
/// Indexed by `Weekday::num_days_from_monday()`; `None` leaves the date as is.
#[derive(Clone, Debug)]
pub struct WeekendAdjustmentRule {
    rule: [Option<i64>; 7]
}

impl WeekendAdjustmentRule {
    /// Consecutive weekend days marked in the map are skipped over, so
    /// Saturday with `PreviousWeekday` and Sunday with `NextWeekday` land on
    /// Friday and Monday respectively.
    pub fn new(adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> WeekendAdjustmentRule {
        let mut rule: [Option<i64>; 7] = [None; 7];

        for (&weekday, &adj) in adjustment_map {
            if adj == WeekendAdjustment::Unadjusted {
                continue;
            }

            let mut to_weekday = weekday;
            let next_weekday = if adj == WeekendAdjustment::NextWeekday {
                Weekday::succ
            } else {
                Weekday::pred
            };

            let mut shift_days = 0;
            let one_day = adj as i64;

            while adjustment_map.contains_key(&to_weekday) {
                to_weekday = next_weekday(&to_weekday);
                shift_days += one_day;
            }

            rule[weekday.num_days_from_monday() as usize] = Some(shift_days);
        }

        WeekendAdjustmentRule { rule }
    }

    pub fn is_empty(&self) -> bool {
        self.rule.iter().all(Option::is_none)
    }

    pub fn adjustment_count(&self) -> u32 {
        self.rule.iter().filter(|r| r.is_some()).count() as u32
    }

    #[inline]
    pub fn adjust(&self, d: NaiveDate) -> NaiveDate {
        match self.rule[d.weekday().num_days_from_monday() as usize] {
            Some(shift_days) => d + Duration::days(shift_days),
            None => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed() -> WeekendAdjustmentRule {
        let mut map = HashMap::new();
        map.insert(Weekday::Sat, WeekendAdjustment::PreviousWeekday);
        map.insert(Weekday::Sun, WeekendAdjustment::NextWeekday);
        WeekendAdjustmentRule::new(&map)
    }

    #[test]
    fn saturday_moves_to_friday() {
        // 2021-12-25 is a Saturday
        let d = NaiveDate::from_ymd_opt(2021, 12, 25).unwrap();
        assert_eq!(observed().adjust(d), NaiveDate::from_ymd_opt(2021, 12, 24).unwrap());
    }

    #[test]
    fn sunday_moves_to_monday() {
        // 2022-12-25 is a Sunday
        let d = NaiveDate::from_ymd_opt(2022, 12, 25).unwrap();
        assert_eq!(observed().adjust(d), NaiveDate::from_ymd_opt(2022, 12, 26).unwrap());
    }

    #[test]
    fn weekday_is_untouched() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(observed().adjust(d), d);
        assert!(WeekendAdjustmentRule::new(&HashMap::new()).is_empty());
    }
}
