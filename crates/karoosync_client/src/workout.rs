//! Workout records in the shape the Hammerhead dashboard imports them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provenance marker sent with every uploaded workout.
pub const WORKOUT_SOURCE: &str = "N/A";

/// Name used when the source document has none.
pub const DEFAULT_WORKOUT_NAME: &str = "Workout";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub name: String,
    pub source: String,
    pub structure: Vec<WorkoutStep>,
    /// `YYYY-MM-DD`, passed through from the caller.
    pub planned_date: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepClass {
    Active,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LengthType {
    Seconds,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Step,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStep {
    pub class: StepClass,
    #[serde(rename = "length")]
    pub length_seconds: u32,
    pub length_type: LengthType,
    pub primary_target: Target,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_target: Option<Target>,
}

impl WorkoutStep {
    /// A steady-state step. `power_percent` stays absent when the source step
    /// declared no power.
    pub fn steady(length_seconds: u32, power_percent: Option<i64>, cadence: Option<i64>) -> Self {
        Self {
            class: StepClass::Active,
            length_seconds,
            length_type: LengthType::Seconds,
            primary_target: Target {
                kind: TargetKind::PercentFtp,
                value: power_percent,
            },
            kind: StepKind::Step,
            secondary_target: cadence.map(|value| Target {
                kind: TargetKind::Cadence,
                value: Some(value),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TargetKind {
    #[serde(rename = "percent-ftp")]
    PercentFtp,
    #[serde(rename = "cadence")]
    Cadence,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    #[serde(rename = "type")]
    pub kind: TargetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// A workout picked from the source calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutSummary {
    pub id: String,
    pub date: NaiveDate,
    pub name: Option<String>,
}

/// A workout document to upload as a file.
#[derive(Clone, Debug)]
pub struct WorkoutFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// File name for a workout document: `<date> <name>.zwo`, with characters
/// that are unsafe in file names replaced by `_`.
pub fn workout_filename(date: &str, name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();
    let name = if cleaned.is_empty() {
        DEFAULT_WORKOUT_NAME
    } else {
        cleaned
    };
    format!("{date} {name}.zwo")
}
