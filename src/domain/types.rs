/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier newtypes and the enumerations
/// (frequency, status, weekday, sort order) that Habit and the store use.
/// Wire spellings follow the public API: Portuguese values, with unaccented
/// aliases accepted on input.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Unique identifier for a habit
///
/// Assigned sequentially by the store, starting at 1. Wrapping the integer
/// keeps habit ids and user ids from being mixed up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct HabitId(pub u64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user who owns a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl Default for UserId {
    /// The stubbed single user every request acts on behalf of
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit recurs
///
/// Weekly habits are scheduled on specific weekdays and monthly habits on
/// specific days of the month; the day lists live on the Habit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Frequency {
    #[serde(rename = "diária", alias = "diaria")]
    Daily,
    #[serde(rename = "semanal")]
    Weekly,
    #[serde(rename = "mensal")]
    Monthly,
}

impl Frequency {
    /// Wire spelling of this frequency
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "diária",
            Frequency::Weekly => "semanal",
            Frequency::Monthly => "mensal",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle marker of a habit
///
/// Caller-controlled: any status may be changed to any other through an
/// update. New habits start out active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum HabitStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "inativo")]
    Inactive,
    #[serde(rename = "concluído", alias = "concluido")]
    Completed,
}

impl HabitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::Active => "ativo",
            HabitStatus::Inactive => "inativo",
            HabitStatus::Completed => "concluído",
        }
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week a weekly habit is scheduled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DayOfWeek {
    #[serde(rename = "segunda")]
    Monday,
    #[serde(rename = "terça", alias = "terca")]
    Tuesday,
    #[serde(rename = "quarta")]
    Wednesday,
    #[serde(rename = "quinta")]
    Thursday,
    #[serde(rename = "sexta")]
    Friday,
    #[serde(rename = "sábado", alias = "sabado")]
    Saturday,
    #[serde(rename = "domingo")]
    Sunday,
}

/// Ordering applied to a habit listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum SortOrder {
    #[serde(rename = "nome_asc")]
    NameAsc,
    #[serde(rename = "nome_desc")]
    NameDesc,
    #[serde(rename = "data_criacao_asc")]
    CreatedAsc,
    /// Newest first
    #[default]
    #[serde(rename = "data_criacao_desc")]
    CreatedDesc,
}
