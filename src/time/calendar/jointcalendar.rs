use std::sync::Arc;

use crate::time::calendar::holidaycalendar::{HolidayCalendar, YearHolidays};

/// A region extending another: the holidays of `c1` come first, then
/// those of `c2`. When both list the same day, `c1` wins a match.
pub struct JointCalendar {
    c1: Arc<dyn HolidayCalendar>,
    c2: Arc<dyn HolidayCalendar>
}

impl JointCalendar {
    pub fn union(c1: Arc<dyn HolidayCalendar>, c2: Arc<dyn HolidayCalendar>) -> JointCalendar {
        JointCalendar { c1, c2 }
    }

    pub fn c1(&self) -> &Arc<dyn HolidayCalendar> {
        &self.c1
    }

    pub fn c2(&self) -> &Arc<dyn HolidayCalendar> {
        &self.c2
    }
}

impl HolidayCalendar for JointCalendar {
    fn year_holidays(&self, year: i32) -> YearHolidays<'_> {
        Box::new(self.c1.year_holidays(year).chain(self.c2.year_holidays(year)))
    }
}
