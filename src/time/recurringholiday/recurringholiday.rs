use chrono::{Datelike, NaiveDate};


/// A rule producing the dates a holiday falls on in a given year.
pub trait RecurringHoliday: Send + Sync {

    /// Dates of the holiday within `year`, in ascending order.
    fn get_holiday(&self, year: i32) -> Vec<NaiveDate>;

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        self.get_holiday(d.year()).contains(d)
    }
}
