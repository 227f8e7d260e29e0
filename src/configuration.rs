use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::holiday::holidayengine::HolidayEngine;
use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    FrozenManager,
    IManager,
    ManagerBuilder,
    read_json_file
};
use crate::names::namedatasource::{
    JsonNameSource,
    MemoryNameSource,
    NameDataSource
};
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidaycalendarmanager::RegionLoader;


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    names_folder: Option<PathBuf>,
    regions: Vec<serde_json::Value>
}

/// Regions and holiday-name data loaded from one JSON document:
///
/// ```json
/// {
///     "locale": "en",
///     "names_folder": "names",
///     "regions": [ { "name": "...", "calendar_type": "SimpleCalendar", ... } ]
/// }
/// ```
///
/// A relative `names_folder` is resolved against the document's folder.
pub struct Configuration {
    regions: FrozenManager<dyn HolidayCalendar>,
    names: Arc<dyn NameDataSource>,
    locale: Option<String>
}


impl Configuration {
    pub fn from_reader(file_path: &Path) -> Result<Configuration, ManagerError> {
        let json_value = read_json_file(file_path)?;
        let base = file_path.parent().unwrap_or_else(|| Path::new("."));
        let configuration = Configuration::from_json_value(json_value, base)?;
        info!(
            path = %file_path.display(),
            regions = configuration.regions.len(),
            "loaded holiday configuration"
        );
        Ok(configuration)
    }

    pub fn from_json_value(json_value: serde_json::Value, base: &Path) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;

        let mut builder = ManagerBuilder::new();
        RegionLoader.insert_obj_from_json_vec(&mut builder, &json_prop.regions)?;

        let names: Arc<dyn NameDataSource> = match json_prop.names_folder {
            Some(folder) => Arc::new(JsonNameSource::new(base.join(folder))),
            None => Arc::new(MemoryNameSource::new())
        };

        Ok(Configuration {
            regions: builder.build(),
            names,
            locale: json_prop.locale
        })
    }

    pub fn regions(&self) -> &FrozenManager<dyn HolidayCalendar> {
        &self.regions
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// A fresh engine for `region`, sharing this configuration's name data.
    pub fn engine(&self, region: &str) -> Result<HolidayEngine, ManagerError> {
        let calendar = self.regions.get(region)?;
        Ok(HolidayEngine::new(region, calendar, Arc::clone(&self.names))
            .with_locale(self.locale.clone()))
    }
}
