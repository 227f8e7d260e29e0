use chrono::{
    Datelike,
    NaiveDate,
    NaiveDateTime
};

/// The narrow view of a host date the holiday engine depends on.
///
/// Any date-like type can be queried for holidays once it can report its
/// year, its `dd/mm` form and, optionally, the locale it was configured with.
pub trait HolidayDate {
    fn year(&self) -> i32;

    /// Day and month as `dd/mm`.
    fn day_month(&self) -> String;

    /// Day, month and year as `dd/mm/yyyy`.
    fn day_month_year(&self) -> String {
        format!("{}/{}", self.day_month(), self.year())
    }

    fn locale(&self) -> Option<&str> {
        None
    }
}

impl HolidayDate for NaiveDate {
    fn year(&self) -> i32 {
        Datelike::year(self)
    }

    fn day_month(&self) -> String {
        self.format("%d/%m").to_string()
    }
}

impl HolidayDate for NaiveDateTime {
    fn year(&self) -> i32 {
        Datelike::year(self)
    }

    fn day_month(&self) -> String {
        self.format("%d/%m").to_string()
    }
}

/// A date carrying the locale its owner configured, e.g. `fr_CA`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedDate {
    date: NaiveDate,
    locale: Option<String>
}

impl LocalizedDate {
    pub fn new(date: NaiveDate, locale: Option<String>) -> LocalizedDate {
        LocalizedDate { date, locale }
    }

    pub fn with_locale(date: NaiveDate, locale: &str) -> LocalizedDate {
        LocalizedDate::new(date, Some(locale.to_owned()))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl HolidayDate for LocalizedDate {
    fn year(&self) -> i32 {
        Datelike::year(&self.date)
    }

    fn day_month(&self) -> String {
        self.date.day_month()
    }

    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_date_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(d.day_month(), "07/03");
        assert_eq!(d.day_month_year(), "07/03/2024");
        assert_eq!(d.locale(), None);
        // years are not padded
        assert_eq!(NaiveDate::from_ymd_opt(999, 1, 1).unwrap().day_month_year(), "01/01/999");
    }

    #[test]
    fn localized_date_reports_locale() {
        let d = LocalizedDate::with_locale(NaiveDate::from_ymd_opt(2030, 12, 25).unwrap(), "fr_CA");
        assert_eq!(d.day_month(), "25/12");
        assert_eq!(HolidayDate::year(&d), 2030);
        assert_eq!(d.locale(), Some("fr_CA"));
    }
}
