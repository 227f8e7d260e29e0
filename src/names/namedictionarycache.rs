use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::namedatasource::{NameDataSource, NameDictionary, NameSourceError};

pub const DEFAULT_HOLIDAY_LOCALE: &str = "en";

/// Drops a regional suffix: `en_US` -> `en`, `fr-CA` -> `fr`.
/// Strings starting with a separator are left alone.
pub fn normalize_locale(locale: &str) -> &str {
    match locale.find(['_', '-']) {
        Some(i) if i > 0 => &locale[..i],
        _ => locale
    }
}

/// `None` marks a locale already known to have no data.
type Entries = HashMap<String, Option<Arc<NameDictionary>>>;

/// Lazily loaded holiday-name dictionaries, one per locale.
///
/// A locale is loaded at most once: both found dictionaries and misses are
/// remembered for the lifetime of the cache. Locales without data, or with
/// an empty dictionary, resolve to the default locale's names.
pub struct NameDictionaryCache {
    source: Arc<dyn NameDataSource>,
    default_locale: String,
    entries: RwLock<Entries>
}

impl NameDictionaryCache {
    pub fn new(source: Arc<dyn NameDataSource>) -> NameDictionaryCache {
        NameDictionaryCache::with_default_locale(source, DEFAULT_HOLIDAY_LOCALE)
    }

    pub fn with_default_locale(source: Arc<dyn NameDataSource>, default_locale: &str) -> NameDictionaryCache {
        NameDictionaryCache {
            source,
            default_locale: default_locale.to_owned(),
            entries: RwLock::new(HashMap::new())
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Names for `locale`, falling back to the default locale. Returns an
    /// empty dictionary only when the default locale has no data either.
    pub fn get_names(&self, locale: &str) -> Arc<NameDictionary> {
        let locale = normalize_locale(locale);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(locale) {
                Some(Some(names)) if !names.is_empty() => return Arc::clone(names),
                // known miss or empty: the default answers once it is cached
                Some(_) => {
                    if let Some(default) = entries.get(self.default_locale.as_str()) {
                        return default.clone().unwrap_or_default();
                    }
                },
                None => {}
            }
        }

        // loads happen under the write lock so a locale is never loaded twice
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.get_names_locked(&mut entries, locale)
    }

    /// Whether `locale` already has a (positive or negative) entry.
    pub fn is_cached(&self, locale: &str) -> bool {
        self.entries.read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(normalize_locale(locale))
    }

    fn get_names_locked(&self, entries: &mut Entries, locale: &str) -> Arc<NameDictionary> {
        if let Some(entry) = entries.get(locale).cloned() {
            return match entry {
                Some(names) if !names.is_empty() => names,
                Some(names) if locale == self.default_locale => names,
                None if locale == self.default_locale => Arc::default(),
                _ => self.get_names_locked(entries, &self.default_locale)
            };
        }

        let mut locale = locale;
        if locale != self.default_locale {
            let names = self.load(locale);
            entries.insert(locale.to_owned(), names.clone());
            if let Some(names) = names.filter(|names| !names.is_empty()) {
                return names;
            }
            locale = self.default_locale.as_str();
            if let Some(entry) = entries.get(locale) {
                return entry.clone().unwrap_or_default();
            }
        }

        let names = self.load(locale);
        entries.insert(locale.to_owned(), names.clone());
        names.unwrap_or_default()
    }

    fn load(&self, locale: &str) -> Option<Arc<NameDictionary>> {
        match self.source.load(locale) {
            Ok(names) => {
                debug!(locale, holidays = names.len(), "loaded holiday names");
                Some(Arc::new(names))
            },
            Err(NameSourceError::NotFound(_)) => {
                debug!(locale, "no holiday names for locale");
                None
            },
            Err(error) => {
                warn!(locale, %error, "ignoring unreadable holiday names");
                None
            }
        }
    }
}
