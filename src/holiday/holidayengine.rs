use std::any::Any;
use std::sync::Arc;

use uuid::Uuid;

use crate::date::holidaydate::HolidayDate;
use crate::holiday::holidayid::HolidayId;
use crate::holiday::holidayquery::{HolidayQuery, UNKNOWN_HOLIDAY_NAME};
use crate::names::namedatasource::NameDataSource;
use crate::names::namedictionarycache::{DEFAULT_HOLIDAY_LOCALE, NameDictionaryCache};
use crate::objectwithuuid::ObjectWithUUID;
use crate::resolver::strategyregistry::{Resolver, StrategyRegistry};
use crate::time::calendar::holidaycalendar::HolidayCalendar;

/// Holiday resolution for one region.
///
/// The engine owns the region's calendar, its resolver strategies and its
/// holiday-name cache. It is `Send + Sync` and meant to be shared behind an
/// `Arc`; all state changes go through interior locks.
pub struct HolidayEngine {
    uuid: Uuid,
    region: String,
    calendar: Arc<dyn HolidayCalendar>,
    registry: StrategyRegistry,
    names: NameDictionaryCache,
    locale: Option<String>
}

impl HolidayEngine {
    pub fn new(
        region: impl Into<String>,
        calendar: Arc<dyn HolidayCalendar>,
        names: Arc<dyn NameDataSource>
    ) -> HolidayEngine {
        HolidayEngine {
            uuid: Uuid::new_v4(),
            region: region.into(),
            calendar,
            registry: StrategyRegistry::new(),
            names: NameDictionaryCache::new(names),
            locale: None
        }
    }

    /// Locale used for names when neither the caller nor the date gives one.
    pub fn with_locale(mut self, locale: Option<String>) -> HolidayEngine {
        self.locale = locale;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn calendar(&self) -> &Arc<dyn HolidayCalendar> {
        &self.calendar
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn names(&self) -> &NameDictionaryCache {
        &self.names
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Sets or clears the engine's default resolver.
    pub fn set_resolver(&self, resolver: Option<Resolver>) {
        self.registry.set_default_resolver(resolver);
    }

    /// Sets or clears the resolver used by queries owned by `owner`.
    /// The engine never keeps `owner` alive.
    pub fn set_resolver_for<O>(&self, owner: &Arc<O>, resolver: Option<Resolver>)
        where O: Any + Send + Sync {
        self.registry.set_resolver(owner, resolver);
    }

    /// A query with no owner and no context date (today is used).
    pub fn query(&self) -> HolidayQuery<'_> {
        HolidayQuery::new(self)
    }

    pub fn query_on<'a>(&'a self, date: &'a dyn HolidayDate) -> HolidayQuery<'a> {
        HolidayQuery::new(self).on(date)
    }

    pub fn get_holiday_id(&self, date: &dyn HolidayDate) -> Option<HolidayId> {
        self.query().get_holiday_id(Some(date))
    }

    pub fn is_holiday(&self, date: &dyn HolidayDate) -> bool {
        self.query().is_holiday(Some(date))
    }

    pub fn get_holiday_name(&self, locale: Option<&str>, date: &dyn HolidayDate) -> Option<String> {
        self.query().get_holiday_name(locale, Some(date))
    }

    /// Display name of an already resolved holiday. Without `locale` the
    /// engine's locale is used, then `"en"`.
    pub fn holiday_name(&self, id: &HolidayId, locale: Option<&str>) -> String {
        let locale = locale
            .filter(|l| !l.is_empty())
            .or_else(|| self.locale())
            .unwrap_or(DEFAULT_HOLIDAY_LOCALE);
        self.names.get_names(locale)
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_HOLIDAY_NAME.to_owned())
    }
}

impl ObjectWithUUID for HolidayEngine {
    fn uuid(&self) -> &Uuid {
        &self.uuid
    }
}
