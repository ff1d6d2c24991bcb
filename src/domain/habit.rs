/// Habit entity and related functionality
///
/// This module defines the core Habit record, the input used to create one
/// (`NewHabit`) and the partial update applied to an existing one
/// (`HabitPatch`).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{DayOfWeek, Frequency, HabitId, HabitStatus, UserId};

/// A habit represents a recurring activity a user wants to keep up
///
/// Field names on the wire follow the public API (`nomeHabito`,
/// `frequencia`, ...). Dates serialize as RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier, assigned by the store
    pub id: HabitId,
    /// Owner of this habit; every lookup is scoped by it
    #[serde(rename = "idUsuario")]
    pub owner: UserId,
    /// Display name (e.g., "Morning Run")
    #[serde(rename = "nomeHabito")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "frequencia")]
    pub frequency: Frequency,
    /// Weekdays a weekly habit is scheduled on
    #[serde(rename = "diasSemana")]
    pub days_of_week: Option<Vec<DayOfWeek>>,
    /// Days of the month (1-31) a monthly habit is scheduled on
    #[serde(rename = "diasMes")]
    pub days_of_month: Option<Vec<u8>>,
    /// Time of day in "HH:MM"
    #[serde(rename = "horarioInicio")]
    pub start_time: Option<String>,
    /// Estimated duration in minutes
    #[serde(rename = "duracaoEstimada")]
    pub estimated_duration: Option<u32>,
    /// Category reference; not checked against any category list
    #[serde(rename = "categoriaId")]
    pub category_id: Option<u64>,
    #[serde(rename = "dataInicio")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "dataTermino")]
    pub end_date: Option<DateTime<Utc>>,
    /// When this habit was created; never changes afterwards
    #[serde(rename = "dataCriacao")]
    pub created_at: DateTime<Utc>,
    pub status: HabitStatus,
}

/// Input for creating a habit
///
/// The store fills in the id, creation timestamp and status. A missing
/// start date defaults to the creation time.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct NewHabit {
    /// Habit name, 3-50 characters
    #[serde(rename = "nomeHabito")]
    pub name: String,
    /// Optional description, at most 200 characters
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// diária, semanal or mensal
    #[serde(rename = "frequencia")]
    pub frequency: Frequency,
    /// Required for weekly habits
    #[serde(rename = "diasSemana", default)]
    pub days_of_week: Option<Vec<DayOfWeek>>,
    /// Required for monthly habits, each day 1-31
    #[serde(rename = "diasMes", default)]
    pub days_of_month: Option<Vec<u8>>,
    /// Start time in HH:MM
    #[serde(rename = "horarioInicio", default)]
    pub start_time: Option<String>,
    /// Estimated duration in minutes
    #[serde(rename = "duracaoEstimada", default)]
    pub estimated_duration: Option<u32>,
    #[serde(rename = "categoriaId", default)]
    pub category_id: Option<u64>,
    /// Must not be before today
    #[serde(rename = "dataInicio", default, deserialize_with = "deserialize_some_date")]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub start_date: Option<DateTime<Utc>>,
    /// Must be after the start date
    #[serde(rename = "dataTermino", default, deserialize_with = "deserialize_optional_date")]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub end_date: Option<DateTime<Utc>>,
}

impl NewHabit {
    /// Minimal input: a name and a frequency, everything else unset
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            description: None,
            frequency,
            days_of_week: None,
            days_of_month: None,
            start_time: None,
            estimated_duration: None,
            category_id: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// Partial update of a habit
///
/// `None` means "leave unchanged". For nullable fields the inner option
/// distinguishes an explicit `null` (`Some(None)`, clears the value) from a
/// new value (`Some(Some(v))`). An explicit `null` for a field that cannot be
/// cleared is rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
pub struct HabitPatch {
    #[serde(rename = "nomeHabito", default, deserialize_with = "deserialize_some")]
    pub name: Option<String>,
    #[serde(rename = "descricao", default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<String>")]
    pub description: Option<Option<String>>,
    #[serde(rename = "frequencia", default, deserialize_with = "deserialize_some")]
    pub frequency: Option<Frequency>,
    #[serde(rename = "diasSemana", default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<Vec<DayOfWeek>>")]
    pub days_of_week: Option<Option<Vec<DayOfWeek>>>,
    #[serde(rename = "diasMes", default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<Vec<u8>>")]
    pub days_of_month: Option<Option<Vec<u8>>>,
    #[serde(rename = "horarioInicio", default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<String>")]
    pub start_time: Option<Option<String>>,
    #[serde(rename = "duracaoEstimada", default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<u32>")]
    pub estimated_duration: Option<Option<u32>>,
    #[serde(rename = "categoriaId", default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<u64>")]
    pub category_id: Option<Option<u64>>,
    #[serde(rename = "dataInicio", default, deserialize_with = "deserialize_some_date")]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "dataTermino", default, deserialize_with = "deserialize_some_optional_date")]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    /// ativo, inativo or concluído
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<HabitStatus>,
}

/// Wraps any present value (including `null`) in `Some`, so that together
/// with `#[serde(default)]` a missing field stays `None`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A date as clients send it: an RFC 3339 timestamp, or a calendar date
/// (`YYYY-MM-DD`) taken as midnight UTC
struct WireDate(DateTime<Utc>);

impl<'de> Deserialize<'de> for WireDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_wire_date(&raw).map(WireDate).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid date '{}', expected YYYY-MM-DD or an RFC 3339 timestamp",
                raw
            ))
        })
    }
}

fn parse_wire_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

fn deserialize_some_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    WireDate::deserialize(deserializer).map(|date| Some(date.0))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<WireDate>::deserialize(deserializer).map(|date| date.map(|d| d.0))
}

fn deserialize_some_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_date(deserializer).map(Some)
}

impl Habit {
    /// Build a stored record from validated creation input
    ///
    /// An empty description is stored as absent.
    pub fn from_new(id: HabitId, owner: UserId, new: NewHabit, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            name: new.name,
            description: new.description.filter(|d| !d.is_empty()),
            frequency: new.frequency,
            days_of_week: new.days_of_week,
            days_of_month: new.days_of_month,
            start_time: new.start_time,
            estimated_duration: new.estimated_duration,
            category_id: new.category_id,
            start_date: new.start_date.unwrap_or(now),
            end_date: new.end_date,
            created_at: now,
            status: HabitStatus::default(),
        }
    }

    /// Merge a partial update into this habit
    ///
    /// Only supplied fields change. `id`, `owner` and `created_at` are not
    /// part of a patch.
    pub fn apply(&mut self, patch: HabitPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(days) = patch.days_of_week {
            self.days_of_week = days;
        }
        if let Some(days) = patch.days_of_month {
            self.days_of_month = days;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(duration) = patch.estimated_duration {
            self.estimated_duration = duration;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Creation input for a copy of this habit under a new name
    ///
    /// The copy starts `now`; the end date is carried over as is.
    pub fn duplicate_as(&self, new_name: String, now: DateTime<Utc>) -> NewHabit {
        NewHabit {
            name: new_name,
            description: self.description.clone(),
            frequency: self.frequency,
            days_of_week: self.days_of_week.clone(),
            days_of_month: self.days_of_month.clone(),
            start_time: self.start_time.clone(),
            estimated_duration: self.estimated_duration,
            category_id: self.category_id,
            start_date: Some(now),
            end_date: self.end_date,
        }
    }
}
