use std::any::Any;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::date::holidaydate::HolidayDate;
use crate::holiday::holidayengine::HolidayEngine;
use crate::holiday::holidayid::HolidayId;
use crate::objectwithuuid::ObjectWithUUID;
use crate::resolver::fallbackmatcher::FallbackMatcher;
use crate::resolver::strategyregistry::{OwnerHandle, Resolver};

/// Placeholder name of a holiday missing from the resolved dictionary.
pub const UNKNOWN_HOLIDAY_NAME: &str = "Unknown";

/// The context a holiday question is asked in: which engine, which owning
/// object picks the resolver, and which date is meant when none is given.
///
/// Each operation takes an optional date; without one the query's context
/// date is used, and without that, today.
#[derive(Clone)]
pub struct HolidayQuery<'a> {
    engine: &'a HolidayEngine,
    owner: Option<OwnerHandle>,
    date: Option<&'a dyn HolidayDate>
}

impl<'a> HolidayQuery<'a> {
    pub(crate) fn new(engine: &'a HolidayEngine) -> HolidayQuery<'a> {
        HolidayQuery { engine, owner: None, date: None }
    }

    /// Resolve through `owner`'s resolver, falling back to the engine's
    /// default resolver when the owner has none.
    pub fn owned_by<O>(mut self, owner: &'a Arc<O>) -> HolidayQuery<'a>
        where O: Any + Send + Sync {
        self.owner = Some(OwnerHandle::of(owner));
        self
    }

    /// Context date used when an operation gets no explicit date.
    pub fn on(mut self, date: &'a dyn HolidayDate) -> HolidayQuery<'a> {
        self.date = Some(date);
        self
    }

    /// Sets or clears the resolver of this query's owner, or the engine's
    /// default resolver when the query has no owner.
    pub fn set_resolver(&self, resolver: Option<Resolver>) {
        match &self.owner {
            Some(owner) => self.engine.registry().set_handle_resolver(owner, resolver),
            None => self.engine.registry().set_default_resolver(resolver)
        }
    }

    /// The id of the holiday on the date, or `None` if it is not a holiday.
    pub fn get_holiday_id(&self, date: Option<&dyn HolidayDate>) -> Option<HolidayId> {
        self.with_date(date, |date| self.resolve(date))
    }

    pub fn is_holiday(&self, date: Option<&dyn HolidayDate>) -> bool {
        self.get_holiday_id(date).is_some()
    }

    /// Display name of the holiday on the date, `None` if it is not a
    /// holiday, or `"Unknown"` when the holiday has no name in the locale
    /// nor in the default locale.
    ///
    /// The locale is, in order: `locale`, the date's own locale, the
    /// engine's locale, then `"en"`. Regional suffixes are ignored.
    pub fn get_holiday_name(&self, locale: Option<&str>, date: Option<&dyn HolidayDate>) -> Option<String> {
        self.with_date(date, |date| {
            let id = self.resolve(date)?;
            let locale = locale
                .filter(|l| !l.is_empty())
                .or_else(|| date.locale().filter(|l| !l.is_empty()));
            Some(self.engine.holiday_name(&id, locale))
        })
    }

    fn with_date<R>(&self, date: Option<&dyn HolidayDate>, f: impl FnOnce(&dyn HolidayDate) -> R) -> R {
        match date.or(self.date) {
            Some(date) => f(date),
            None => {
                let today: NaiveDate = Local::now().date_naive();
                f(&today)
            }
        }
    }

    fn resolve(&self, date: &dyn HolidayDate) -> Option<HolidayId> {
        let calendar = self.engine.calendar();
        let fallback = || FallbackMatcher::resolve(date, calendar.as_ref());
        let resolver = self.engine
            .registry()
            .effective_resolver(self.owner.as_ref().map(OwnerHandle::key));

        let custom = resolver.is_some();
        let id = match resolver {
            Some(resolver) => resolver(self.engine.region(), date, &fallback),
            None => fallback()
        };
        debug!(
            engine = %self.engine.uuid(),
            region = self.engine.region(),
            date = %date.day_month_year(),
            owned = self.owner.is_some(),
            custom,
            holiday = ?id,
            "resolved holiday"
        );
        id
    }
}
