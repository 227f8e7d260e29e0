use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use serde_json;
use tracing::debug;

use crate::holiday::holidayid::HolidayId;
use crate::manager::manager::{IManager, ManagerBuilder};
use crate::manager::managererror::{ManagerError, parse_json_value};
use crate::manager::namedobject::NamedJsonObject;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::jointcalendar::JointCalendar;
use crate::time::calendar::simplecalendar::SimpleCalendar;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;
use crate::time::recurringholiday::weekendadjustment::WeekendAdjustment;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::nthweekdayholiday::NthWeekdayHoliday;
use crate::time::recurringholiday::lastweekdayholiday::LastWeekdayHoliday;
use crate::time::recurringholiday::easterrelatedholiday::{
    EasterType,
    EasterRelatedHoliday
};

// ─────────────────────────────────────────────────────────────────────────────
// Recurring holiday rules
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EasterRelatedHolidayJsonProp {
    easter_type: EasterType,
    #[serde(default)]
    shift_days: i32
}

fn easter_related_holiday_from_json(id: &str, json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: EasterRelatedHolidayJsonProp = parse_json_value(json)?;
    let holiday = EasterRelatedHoliday::new(json_prop.easter_type, json_prop.shift_days)
        .ok_or_else(|| ManagerError::invalid_holiday(id, format!("shift of {} days is out of range", json_prop.shift_days)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct NthWeekdayHolidayJsonProp {
    month: u32,
    n: u8,
    weekday: Weekday,
}

fn nth_weekday_from_json(id: &str, json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: NthWeekdayHolidayJsonProp = parse_json_value(json)?;
    let holiday = NthWeekdayHoliday::new(json_prop.month, json_prop.n, json_prop.weekday)
        .ok_or_else(|| ManagerError::invalid_holiday(id, format!("no weekday #{} in month {}", json_prop.n, json_prop.month)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct LastWeekdayHolidayJsonProp {
    month: u32,
    weekday: Weekday,
}

fn last_weekday_from_json(id: &str, json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: LastWeekdayHolidayJsonProp = parse_json_value(json)?;
    let holiday = LastWeekdayHoliday::new(json_prop.month, json_prop.weekday)
        .ok_or_else(|| ManagerError::invalid_holiday(id, format!("invalid month {}", json_prop.month)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct FixedDateHolidayJsonProp {
    month: u32,
    day: u32,
    #[serde(default)]
    weekend_adjustment_map: HashMap<Weekday, WeekendAdjustment>
}

fn fixed_date_holiday_from_json(id: &str, json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: FixedDateHolidayJsonProp = parse_json_value(json)?;
    let holiday = FixedDateHoliday::new(json_prop.month, json_prop.day, &json_prop.weekend_adjustment_map)
        .ok_or_else(|| ManagerError::invalid_holiday(id, format!("invalid date {:02}/{:02}", json_prop.day, json_prop.month)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
enum HolidayType {
    EasterRelated,
    FixedDate,
    NthWeekday,
    LastWeekday
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    id: HolidayId,
    holiday_type: HolidayType
}

fn get_recurring_holiday_from_json(json: serde_json::Value) -> Result<(HolidayId, Arc<dyn RecurringHoliday>), ManagerError> {
    let typed: HolidayTypedObject = parse_json_value(json.clone())?;
    let id = typed.id.as_str();
    let rule = match typed.holiday_type {
        HolidayType::EasterRelated => easter_related_holiday_from_json(id, json),
        HolidayType::FixedDate     => fixed_date_holiday_from_json(id, json),
        HolidayType::LastWeekday   => last_weekday_from_json(id, json),
        HolidayType::NthWeekday    => nth_weekday_from_json(id, json)
    }?;
    Ok((typed.id, rule))
}

// ─────────────────────────────────────────────────────────────────────────────
// Calendars
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
enum CalendarType {
    SimpleCalendar,
    JointCalendar
}

#[derive(Deserialize)]
struct CalendarTypedObject {
    calendar_type: CalendarType
}

#[derive(Deserialize)]
struct AdditionalHolidayJsonProp {
    id: HolidayId,
    date: NaiveDate
}

#[derive(Deserialize)]
struct SimpleCalendarJsonProp {
    #[serde(default)]
    recurring_holidays: Vec<serde_json::Value>,
    #[serde(default)]
    additional_holidays: Vec<AdditionalHolidayJsonProp>
}

fn get_simple_calendar_from_json(json_value: serde_json::Value) -> Result<Arc<dyn HolidayCalendar>, ManagerError> {
    let holiday_calendar_json: SimpleCalendarJsonProp = parse_json_value(json_value)?;
    let mut recurring_holidays: Vec<(HolidayId, Arc<dyn RecurringHoliday>)> = Vec::new();
    for recurring_holiday_json in holiday_calendar_json.recurring_holidays.into_iter() {
        recurring_holidays.push(get_recurring_holiday_from_json(recurring_holiday_json)?);
    }

    let additional_holidays = holiday_calendar_json.additional_holidays
        .into_iter()
        .map(|h| (h.id, h.date))
        .collect();

    Ok(Arc::new(SimpleCalendar::new(recurring_holidays, additional_holidays)))
}

#[derive(Deserialize)]
struct JointCalendarJsonProp {
    c1: String,
    c2: String
}

// ─────────────────────────────────────────────────────────────────────────────
// RegionLoader
// ─────────────────────────────────────────────────────────────────────────────

/// Loads region calendars by name.
///
/// A `JointCalendar` needs both of its parts loaded first, but the JSON
/// array may list it before them. `insert_obj_from_json_vec` therefore
/// retries entries that failed on a missing name until a whole round makes
/// no progress.
pub struct RegionLoader;

impl IManager<dyn HolidayCalendar> for RegionLoader {

    fn insert_obj_from_json(
        &self,
        builder: &mut ManagerBuilder<dyn HolidayCalendar>,
        json_value: serde_json::Value,
    ) -> Result<(), ManagerError> {
        let named_obj: NamedJsonObject = parse_json_value(json_value.clone())?;
        let calendar_typed_object: CalendarTypedObject = parse_json_value(json_value.clone())?;

        let calendar: Arc<dyn HolidayCalendar> = match calendar_typed_object.calendar_type {
            CalendarType::SimpleCalendar => get_simple_calendar_from_json(json_value)?,
            CalendarType::JointCalendar => {
                let joint_prop: JointCalendarJsonProp = parse_json_value(json_value)?;
                // a missing part fails here and is retried next round
                let c1 = builder.get(&joint_prop.c1)?;
                let c2 = builder.get(&joint_prop.c2)?;
                Arc::new(JointCalendar::union(c1, c2))
            }
        };
        debug!(region = named_obj.name(), "loaded region calendar");
        builder.insert(named_obj.name().to_owned(), calendar);
        Ok(())
    }

    fn insert_obj_from_json_vec(
        &self,
        builder: &mut ManagerBuilder<dyn HolidayCalendar>,
        json_vec: &[serde_json::Value],
    ) -> Result<(), ManagerError> {
        let mut remain_indices: Vec<usize> = (0..json_vec.len()).collect();

        loop {
            let mut new_remain_indices: Vec<usize> = Vec::new();

            for &index in remain_indices.iter() {
                match self.insert_obj_from_json(builder, json_vec[index].clone()) {
                    Ok(()) => {},
                    Err(ManagerError::NameNotFoundError(_)) => new_remain_indices.push(index),
                    Err(error) => return Err(error)
                }
            }

            if new_remain_indices.is_empty() {
                return Ok(());
            }

            if remain_indices == new_remain_indices {
                let names = new_remain_indices
                    .iter()
                    .map(|&i| {
                        json_vec[i].get("name")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or("<unnamed>")
                            .to_owned()
                    })
                    .collect();
                return Err(ManagerError::UnresolvedDependency(names));
            }

            remain_indices = new_remain_indices;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn simple(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "calendar_type": "SimpleCalendar",
            "recurring_holidays": [
                { "id": "new-year", "holiday_type": "FixedDate", "month": 1, "day": 1 },
                { "id": "easter-monday", "holiday_type": "EasterRelated", "easter_type": "Western", "shift_days": 1 },
                { "id": "memorial", "holiday_type": "LastWeekday", "month": 5, "weekday": "Mon" },
                { "id": "thanksgiving", "holiday_type": "NthWeekday", "month": 11, "n": 4, "weekday": "Thu" }
            ],
            "additional_holidays": [
                { "id": "jubilee", "date": "2030-06-03" }
            ]
        })
    }

    #[test]
    fn loads_simple_calendar() {
        let mut builder = ManagerBuilder::new();
        RegionLoader.insert_obj_from_json(&mut builder, simple("base")).unwrap();
        let regions = builder.build();
        let base = regions.get("base").unwrap();
        let occurrences: Vec<String> = base.year_holidays(2024).map(|(_, o)| o.to_string()).collect();
        assert_eq!(occurrences, vec!["01/01", "01/04", "27/05", "28/11", "03/06/2030"]);
    }

    #[test]
    fn joint_calendar_waits_for_its_parts() {
        let joint = json!({ "name": "joint", "calendar_type": "JointCalendar", "c1": "base", "c2": "extra" });
        let extra = json!({
            "name": "extra",
            "calendar_type": "SimpleCalendar",
            "recurring_holidays": [{ "id": "bastille", "holiday_type": "FixedDate", "month": 7, "day": 14 }]
        });
        let mut builder = ManagerBuilder::new();
        RegionLoader.insert_obj_from_json_vec(&mut builder, &[joint, simple("base"), extra]).unwrap();
        let regions = builder.build();
        assert_eq!(regions.names(), vec!["base", "extra", "joint"]);
        assert_eq!(regions.get("joint").unwrap().year_holidays(2024).count(), 6);
    }

    #[test]
    fn missing_part_is_reported() {
        let joint = json!({ "name": "joint", "calendar_type": "JointCalendar", "c1": "base", "c2": "nowhere" });
        let mut builder = ManagerBuilder::new();
        let error = RegionLoader.insert_obj_from_json_vec(&mut builder, &[joint, simple("base")]).unwrap_err();
        assert!(matches!(error, ManagerError::UnresolvedDependency(names) if names == vec!["joint".to_owned()]));
    }

    #[test]
    fn invalid_rule_is_rejected() {
        let bad = json!({
            "name": "bad",
            "calendar_type": "SimpleCalendar",
            "recurring_holidays": [{ "id": "never", "holiday_type": "FixedDate", "month": 2, "day": 30 }]
        });
        let mut builder = ManagerBuilder::new();
        let error = RegionLoader.insert_obj_from_json(&mut builder, bad).unwrap_err();
        assert!(matches!(error, ManagerError::InvalidHoliday { ref id, .. } if id == "never"));
    }
}
