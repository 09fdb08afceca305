use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Name, Reps, Sets, TrainingType, Weight};

pub const UNNAMED: &str = "Unnamed";

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Exercise {
    pub name: Name,
    pub is_free_weight: bool,
    pub is_machine: bool,
    pub is_body_weight: bool,
    pub history: History,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub sets: Option<Sets>,
}

impl Exercise {
    /// A new exercise has no training type and no history.
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            name,
            is_free_weight: false,
            is_machine: false,
            is_body_weight: false,
            history: History::default(),
            weight: None,
            reps: None,
            sets: None,
        }
    }

    #[must_use]
    pub fn has_type(&self, training_type: TrainingType) -> bool {
        match training_type {
            TrainingType::FreeWeight => self.is_free_weight,
            TrainingType::Machine => self.is_machine,
            TrainingType::BodyWeight => self.is_body_weight,
        }
    }

    /// Marks the exercise as being performed with the given training type. Flags of other
    /// training types are kept.
    pub fn set_type(&mut self, training_type: TrainingType) {
        match training_type {
            TrainingType::FreeWeight => self.is_free_weight = true,
            TrainingType::Machine => self.is_machine = true,
            TrainingType::BodyWeight => self.is_body_weight = true,
        }
    }

    #[must_use]
    pub fn training_types(&self) -> Vec<TrainingType> {
        TrainingType::ALL
            .into_iter()
            .filter(|t| self.has_type(*t))
            .collect()
    }

    /// Training type preselected when editing the exercise snapshot.
    #[must_use]
    pub fn default_edit_type(&self) -> Option<EditType> {
        if self.is_free_weight {
            Some(EditType::FreeWeight)
        } else if self.is_machine {
            Some(EditType::Machine)
        } else {
            None
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: &ExerciseSnapshot) {
        self.weight = Some(snapshot.weight);
        self.reps = Some(snapshot.reps);
        self.sets = Some(snapshot.sets);
    }
}

/// Training types an edited snapshot can be recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditType {
    FreeWeight,
    Machine,
}

impl From<EditType> for TrainingType {
    fn from(value: EditType) -> Self {
        match value {
            EditType::FreeWeight => TrainingType::FreeWeight,
            EditType::Machine => TrainingType::Machine,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct History(BTreeMap<TrainingType, Vec<HistoryEntry>>);

impl History {
    #[must_use]
    pub fn entries(&self, training_type: TrainingType) -> &[HistoryEntry] {
        self.0.get(&training_type).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, training_type: TrainingType) -> bool {
        self.0.contains_key(&training_type)
    }

    pub fn push(&mut self, training_type: TrainingType, entry: HistoryEntry) {
        self.0.entry(training_type).or_default().push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrainingType, &[HistoryEntry])> {
        self.0.iter().map(|(t, entries)| (*t, entries.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TrainingType, Vec<HistoryEntry>)> for History {
    fn from_iter<T: IntoIterator<Item = (TrainingType, Vec<HistoryEntry>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Recorded set of an exercise. Values that could not be read from storage are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub name: Option<Name>,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub sets: Option<Sets>,
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl HistoryEntry {
    /// Name of the history group the entry belongs to.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.name.as_ref().map_or(UNNAMED, Name::as_str)
    }
}

/// Validated fields of a history entry entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDetails {
    pub name: Name,
    pub weight: Weight,
    pub reps: Reps,
    pub sets: Sets,
    pub notes: String,
}

impl HistoryDetails {
    #[must_use]
    pub fn into_entry(self, date: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            name: Some(self.name),
            weight: Some(self.weight),
            reps: Some(self.reps),
            sets: Some(self.sets),
            notes: self.notes,
            date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseSnapshot {
    pub weight: Weight,
    pub reps: Reps,
    pub sets: Sets,
}

impl ExerciseSnapshot {
    #[must_use]
    pub fn to_entry(&self, date: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            name: None,
            weight: Some(self.weight),
            reps: Some(self.reps),
            sets: Some(self.sets),
            notes: String::new(),
            date,
        }
    }
}
