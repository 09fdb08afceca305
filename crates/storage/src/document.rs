//! Serialized form of the muscle document.
//!
//! Numeric fields are written as numbers. Older documents may contain them as strings, so both
//! forms are accepted when reading.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Muscle {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_uri: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl From<&domain::Muscle> for Muscle {
    fn from(value: &domain::Muscle) -> Self {
        Self {
            name: value.name.to_string(),
            subtitle: value.subtitle.clone(),
            image_uri: value.image_uri.clone(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Muscle> for domain::Muscle {
    type Error = DocumentError;

    fn try_from(value: Muscle) -> Result<Self, Self::Error> {
        let name = domain::Name::new(&value.name)?;
        let mut exercise_names = HashSet::new();
        let exercises = value
            .exercises
            .into_iter()
            .map(|e| -> Result<_, DocumentError> {
                let exercise = domain::Exercise::try_from(e)?;
                if exercise_names.insert(exercise.name.clone()) {
                    Ok(exercise)
                } else {
                    Err(DocumentError::DuplicateExercise(exercise.name.to_string()))
                }
            })
            .collect::<Result<Vec<_>, DocumentError>>()?;
        Ok(Self {
            exercises,
            ..domain::Muscle::new(name, value.subtitle, value.image_uri)
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub is_free_weight: bool,
    #[serde(default)]
    pub is_machine: bool,
    #[serde(default)]
    pub is_body_weight: bool,
    #[serde(default)]
    pub history: History,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Integer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Integer>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.to_string(),
            is_free_weight: value.is_free_weight,
            is_machine: value.is_machine,
            is_body_weight: value.is_body_weight,
            history: History::from(&value.history),
            weight: value.weight.map(|w| Decimal::Number(w.into())),
            reps: value.reps.map(|r| Integer::Number(u32::from(r).into())),
            sets: value.sets.map(|s| Integer::Number(u32::from(s).into())),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DocumentError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            is_free_weight: value.is_free_weight,
            is_machine: value.is_machine,
            is_body_weight: value.is_body_weight,
            history: domain::History::from(value.history),
            weight: value.weight.and_then(weight),
            reps: value.reps.and_then(reps),
            sets: value.sets.and_then(sets),
        })
    }
}

/// History entries per training type. Absent training types have never been used.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_weight: Option<Vec<HistoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<Vec<HistoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<Vec<HistoryEntry>>,
}

impl History {
    fn entries_mut(&mut self, training_type: domain::TrainingType) -> &mut Option<Vec<HistoryEntry>> {
        match training_type {
            domain::TrainingType::FreeWeight => &mut self.free_weight,
            domain::TrainingType::Machine => &mut self.machine,
            domain::TrainingType::BodyWeight => &mut self.body_weight,
        }
    }
}

impl From<&domain::History> for History {
    fn from(value: &domain::History) -> Self {
        let mut history = Self::default();
        for (training_type, entries) in value.iter() {
            *history.entries_mut(training_type) =
                Some(entries.iter().map(HistoryEntry::from).collect());
        }
        history
    }
}

impl From<History> for domain::History {
    fn from(value: History) -> Self {
        [
            (domain::TrainingType::FreeWeight, value.free_weight),
            (domain::TrainingType::Machine, value.machine),
            (domain::TrainingType::BodyWeight, value.body_weight),
        ]
        .into_iter()
        .filter_map(|(training_type, entries)| {
            entries.map(|entries| {
                (
                    training_type,
                    entries
                        .into_iter()
                        .map(domain::HistoryEntry::from)
                        .collect(),
                )
            })
        })
        .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Integer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Integer>,
    #[serde(default)]
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl From<&domain::HistoryEntry> for HistoryEntry {
    fn from(value: &domain::HistoryEntry) -> Self {
        Self {
            name: value.name.as_ref().map(ToString::to_string),
            weight: value.weight.map(|w| Decimal::Number(w.into())),
            reps: value.reps.map(|r| Integer::Number(u32::from(r).into())),
            sets: value.sets.map(|s| Integer::Number(u32::from(s).into())),
            notes: value.notes.clone(),
            date: value.date,
        }
    }
}

impl From<HistoryEntry> for domain::HistoryEntry {
    fn from(value: HistoryEntry) -> Self {
        Self {
            name: value.name.and_then(|n| domain::Name::new(&n).ok()),
            weight: value.weight.and_then(weight),
            reps: value.reps.and_then(reps),
            sets: value.sets.and_then(sets),
            notes: value.notes,
            date: value.date,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Decimal {
    Number(f32),
    Text(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Integer {
    Number(serde_json::Number),
    Text(String),
}

// Numeric values were stored as entered, so values that are blank, unparsable or out of range
// read as absent.

fn weight(value: Decimal) -> Option<domain::Weight> {
    match value {
        Decimal::Number(number) => domain::Weight::new(number).ok(),
        Decimal::Text(text) => domain::Weight::try_from(text.as_str()).ok(),
    }
}

fn reps(value: Integer) -> Option<domain::Reps> {
    match value {
        Integer::Number(number) => domain::Reps::new(integer(&number)?).ok(),
        Integer::Text(text) => domain::Reps::try_from(text.as_str()).ok(),
    }
}

fn sets(value: Integer) -> Option<domain::Sets> {
    match value {
        Integer::Number(number) => domain::Sets::new(integer(&number)?).ok(),
        Integer::Text(text) => domain::Sets::try_from(text.as_str()).ok(),
    }
}

fn integer(number: &serde_json::Number) -> Option<u32> {
    number.as_u64().and_then(|n| u32::try_from(n).ok())
}

pub fn parse(json: &str) -> Result<Vec<domain::Muscle>, DocumentError> {
    let muscles = serde_json::from_str::<Vec<Muscle>>(json)?;
    let mut names = HashSet::new();
    muscles
        .into_iter()
        .map(|m| -> Result<_, DocumentError> {
            let muscle = domain::Muscle::try_from(m)?;
            if names.insert(muscle.name.clone()) {
                Ok(muscle)
            } else {
                Err(DocumentError::DuplicateMuscle(muscle.name.to_string()))
            }
        })
        .collect()
}

pub fn serialize(muscles: &[domain::Muscle]) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(
        &muscles.iter().map(Muscle::from).collect::<Vec<_>>(),
    )?)
}

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("duplicate muscle \"{0}\"")]
    DuplicateMuscle(String),
    #[error("duplicate exercise \"{0}\"")]
    DuplicateExercise(String),
    #[error("invalid name: {0}")]
    Name(#[from] domain::NameError),
}
