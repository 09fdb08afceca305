use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    CreateError, DeleteError, EditType, Entity, Exercise, ExerciseSnapshot, HistoryDetails, HistoryEntry,
    Name, ReadError, Reps, Sets, StorageError, TrainingType, UpdateError, ValidationError, Weight,
};

#[allow(async_fn_in_trait)]
pub trait MuscleService {
    async fn get_muscles(&self) -> Result<Vec<Muscle>, ReadError>;
    async fn get_muscle(&self, muscle: &Name) -> Result<Muscle, ReadError>;
    async fn get_exercise(&self, muscle: &Name, exercise: &Name) -> Result<Exercise, ReadError>;
    async fn get_history(
        &self,
        muscle: &Name,
        exercise: &Name,
        training_type: TrainingType,
        group_name: &str,
    ) -> Result<Vec<HistoryEntry>, ReadError>;
    async fn get_exercises_by_training_type(
        &self,
        muscle: &Name,
    ) -> Result<BTreeMap<Option<TrainingType>, Vec<Exercise>>, ReadError>;

    async fn create_muscle(
        &self,
        name: Name,
        subtitle: Option<String>,
        image_uri: String,
    ) -> Result<Muscle, CreateError>;
    async fn delete_muscle(&self, muscle: &Name) -> Result<Name, DeleteError>;

    async fn create_exercise(&self, muscle: &Name, name: Name) -> Result<Exercise, CreateError>;
    async fn set_exercise_type(
        &self,
        muscle: &Name,
        exercise: &Name,
        training_type: TrainingType,
    ) -> Result<Exercise, UpdateError>;
    async fn append_history_entry(
        &self,
        muscle: &Name,
        exercise: &Name,
        training_type: TrainingType,
        details: HistoryDetails,
    ) -> Result<HistoryEntry, UpdateError>;
    async fn edit_exercise(
        &self,
        muscle: &Name,
        exercise: &Name,
        snapshot: ExerciseSnapshot,
        edit_type: Option<EditType>,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, muscle: &Name, exercise: &Name) -> Result<Name, DeleteError>;

    async fn validate_muscle_name(&self, name: &str) -> Result<Name, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::Missing("name".to_string()));
        }
        match Name::bounded(name) {
            Ok(name) => match self.get_muscles().await {
                Ok(muscles) => {
                    if find_muscle(&muscles, &name).is_none() {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    async fn validate_exercise_name(
        &self,
        muscle: &Name,
        name: &str,
    ) -> Result<Name, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::Missing("name".to_string()));
        }
        match Name::bounded(name) {
            Ok(name) => match self.get_muscle(muscle).await {
                Ok(muscle) => {
                    if muscle.exercise(&name).is_none() {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_image_uri(&self, image_uri: &str) -> Result<String, ValidationError> {
        let image_uri = image_uri.trim();
        if image_uri.is_empty() {
            return Err(ValidationError::Missing("image".to_string()));
        }
        Ok(image_uri.to_string())
    }

    fn validate_training_type(
        &self,
        training_type: Option<TrainingType>,
    ) -> Result<TrainingType, ValidationError> {
        training_type.ok_or_else(|| ValidationError::Missing("training type".to_string()))
    }

    /// Every field of a history entry is required.
    fn validate_history_details(
        &self,
        name: &str,
        weight: &str,
        reps: &str,
        sets: &str,
        notes: &str,
    ) -> Result<HistoryDetails, ValidationError> {
        for (field, value) in [
            ("name", name),
            ("weight", weight),
            ("reps", reps),
            ("sets", sets),
            ("notes", notes),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Missing(field.to_string()));
            }
        }
        Ok(HistoryDetails {
            name: Name::bounded(name).map_err(|err| ValidationError::Other(err.into()))?,
            weight: Weight::try_from(weight).map_err(|err| ValidationError::Other(err.into()))?,
            reps: Reps::try_from(reps).map_err(|err| ValidationError::Other(err.into()))?,
            sets: Sets::try_from(sets).map_err(|err| ValidationError::Other(err.into()))?,
            notes: notes.trim().to_string(),
        })
    }

    fn validate_exercise_snapshot(
        &self,
        weight: &str,
        reps: &str,
        sets: &str,
    ) -> Result<ExerciseSnapshot, ValidationError> {
        Ok(ExerciseSnapshot {
            weight: Weight::try_from(weight).map_err(|err| ValidationError::Other(err.into()))?,
            reps: Reps::try_from(reps).map_err(|err| ValidationError::Other(err.into()))?,
            sets: Sets::try_from(sets).map_err(|err| ValidationError::Other(err.into()))?,
        })
    }
}

/// Access to the document holding all muscles.
///
/// The document is always read and written as a whole.
#[allow(async_fn_in_trait)]
pub trait MuscleRepository {
    async fn read_muscles(&self) -> Result<Vec<Muscle>, ReadError>;
    async fn write_muscles(&self, muscles: &[Muscle]) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Muscle {
    pub name: Name,
    pub subtitle: Option<String>,
    pub image_uri: String,
    pub exercises: Vec<Exercise>,
}

impl Muscle {
    #[must_use]
    pub fn new(name: Name, subtitle: Option<String>, image_uri: String) -> Self {
        Self {
            name,
            subtitle: subtitle.filter(|s| !s.trim().is_empty()),
            image_uri,
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn exercise(&self, name: &Name) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name == *name)
    }

    fn exercise_mut(&mut self, name: &Name) -> Result<&mut Exercise, Entity> {
        self.exercises
            .iter_mut()
            .find(|e| e.name == *name)
            .ok_or(Entity::Exercise)
    }

    /// Exercises listed under each training type they are flagged with. Exercises without any
    /// training type are listed under `None`.
    #[must_use]
    pub fn exercises_by_training_type(&self) -> BTreeMap<Option<TrainingType>, Vec<Exercise>> {
        let mut result: BTreeMap<Option<TrainingType>, Vec<Exercise>> = BTreeMap::new();
        for exercise in &self.exercises {
            let training_types = exercise.training_types();
            if training_types.is_empty() {
                result.entry(None).or_default().push(exercise.clone());
            }
            for training_type in training_types {
                result
                    .entry(Some(training_type))
                    .or_default()
                    .push(exercise.clone());
            }
        }
        result
    }
}

// All lookups are linear scans by name.

#[must_use]
pub fn find_muscle<'a>(muscles: &'a [Muscle], name: &Name) -> Option<&'a Muscle> {
    muscles.iter().find(|m| m.name == *name)
}

fn find_muscle_mut<'a>(muscles: &'a mut [Muscle], name: &Name) -> Result<&'a mut Muscle, Entity> {
    muscles
        .iter_mut()
        .find(|m| m.name == *name)
        .ok_or(Entity::Muscle)
}

fn find_exercise_mut<'a>(
    muscles: &'a mut [Muscle],
    muscle: &Name,
    exercise: &Name,
) -> Result<&'a mut Exercise, Entity> {
    find_muscle_mut(muscles, muscle)?.exercise_mut(exercise)
}

pub fn create_muscle(muscles: &mut Vec<Muscle>, muscle: Muscle) -> Result<Muscle, CreateError> {
    if find_muscle(muscles, &muscle.name).is_some() {
        return Err(CreateError::Conflict(Entity::Muscle));
    }
    muscles.push(muscle.clone());
    Ok(muscle)
}

pub fn delete_muscle(muscles: &mut Vec<Muscle>, name: &Name) -> Result<Name, DeleteError> {
    let len = muscles.len();
    muscles.retain(|m| m.name != *name);
    if muscles.len() == len {
        return Err(DeleteError::NotFound(Entity::Muscle));
    }
    Ok(name.clone())
}

pub fn create_exercise(
    muscles: &mut [Muscle],
    muscle: &Name,
    name: Name,
) -> Result<Exercise, CreateError> {
    let muscle = find_muscle_mut(muscles, muscle).map_err(CreateError::NotFound)?;
    if muscle.exercise(&name).is_some() {
        return Err(CreateError::Conflict(Entity::Exercise));
    }
    let exercise = Exercise::new(name);
    muscle.exercises.push(exercise.clone());
    Ok(exercise)
}

pub fn set_exercise_type(
    muscles: &mut [Muscle],
    muscle: &Name,
    exercise: &Name,
    training_type: TrainingType,
) -> Result<Exercise, UpdateError> {
    let exercise = find_exercise_mut(muscles, muscle, exercise).map_err(UpdateError::NotFound)?;
    exercise.set_type(training_type);
    Ok(exercise.clone())
}

pub fn append_history_entry(
    muscles: &mut [Muscle],
    muscle: &Name,
    exercise: &Name,
    training_type: TrainingType,
    entry: HistoryEntry,
) -> Result<HistoryEntry, UpdateError> {
    let exercise = find_exercise_mut(muscles, muscle, exercise).map_err(UpdateError::NotFound)?;
    exercise.history.push(training_type, entry.clone());
    Ok(entry)
}

/// Replaces the snapshot of an exercise and records it in the history of the selected training
/// type.
pub fn edit_exercise(
    muscles: &mut [Muscle],
    muscle: &Name,
    exercise: &Name,
    snapshot: &ExerciseSnapshot,
    edit_type: Option<EditType>,
    date: DateTime<Utc>,
) -> Result<Exercise, UpdateError> {
    let exercise = find_exercise_mut(muscles, muscle, exercise).map_err(UpdateError::NotFound)?;
    exercise.apply_snapshot(snapshot);
    if let Some(edit_type) = edit_type {
        exercise
            .history
            .push(edit_type.into(), snapshot.to_entry(date));
    }
    Ok(exercise.clone())
}

pub fn delete_exercise(
    muscles: &mut [Muscle],
    muscle: &Name,
    exercise: &Name,
) -> Result<Name, DeleteError> {
    let muscle = find_muscle_mut(muscles, muscle).map_err(DeleteError::NotFound)?;
    let len = muscle.exercises.len();
    muscle.exercises.retain(|e| e.name != *exercise);
    if muscle.exercises.len() == len {
        return Err(DeleteError::NotFound(Entity::Exercise));
    }
    Ok(exercise.clone())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn name(name: &str) -> Name {
        Name::new(name).unwrap()
    }

    fn muscle(muscle: &str, exercises: &[&str]) -> Muscle {
        Muscle {
            exercises: exercises.iter().map(|e| Exercise::new(name(e))).collect(),
            ..Muscle::new(name(muscle), None, "file:///image.png".to_string())
        }
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn details() -> HistoryDetails {
        HistoryDetails {
            name: name("Incline Bench"),
            weight: Weight::new(60.0).unwrap(),
            reps: Reps::new(8).unwrap(),
            sets: Sets::new(3).unwrap(),
            notes: "felt heavy".to_string(),
        }
    }

    fn snapshot() -> ExerciseSnapshot {
        ExerciseSnapshot {
            weight: Weight::new(50.0).unwrap(),
            reps: Reps::new(10).unwrap(),
            sets: Sets::new(4).unwrap(),
        }
    }

    #[test]
    fn test_muscle_new_drops_blank_subtitle() {
        assert_eq!(
            Muscle::new(name("Chest"), Some("  ".to_string()), String::new()).subtitle,
            None
        );
        assert_eq!(
            Muscle::new(name("Chest"), Some("Pecs".to_string()), String::new()).subtitle,
            Some("Pecs".to_string())
        );
    }

    #[test]
    fn test_create_muscle() {
        let mut muscles = vec![muscle("Chest", &[])];
        let back = muscle("Back", &[]);
        assert_eq!(create_muscle(&mut muscles, back.clone()).unwrap(), back);
        assert_eq!(muscles, vec![muscle("Chest", &[]), back]);
    }

    #[test]
    fn test_create_muscle_conflict() {
        let mut muscles = vec![muscle("Chest", &["Bench Press"])];
        let before = muscles.clone();
        assert!(matches!(
            create_muscle(&mut muscles, muscle("Chest", &[])),
            Err(CreateError::Conflict(Entity::Muscle))
        ));
        assert_eq!(muscles, before);
    }

    #[test]
    fn test_delete_muscle() {
        let mut muscles = vec![muscle("Chest", &[]), muscle("Back", &[])];
        assert_eq!(delete_muscle(&mut muscles, &name("Chest")).unwrap(), name("Chest"));
        assert_eq!(muscles, vec![muscle("Back", &[])]);
        assert!(matches!(
            delete_muscle(&mut muscles, &name("Chest")),
            Err(DeleteError::NotFound(Entity::Muscle))
        ));
        assert_eq!(muscles, vec![muscle("Back", &[])]);
    }

    #[test]
    fn test_create_exercise() {
        let mut muscles = vec![muscle("Chest", &[])];
        let exercise = create_exercise(&mut muscles, &name("Chest"), name("Bench Press")).unwrap();
        assert_eq!(exercise, Exercise::new(name("Bench Press")));
        assert_eq!(muscles, vec![muscle("Chest", &["Bench Press"])]);
    }

    #[test]
    fn test_create_exercise_muscle_not_found() {
        let mut muscles = vec![muscle("Chest", &[])];
        assert!(matches!(
            create_exercise(&mut muscles, &name("Back"), name("Row")),
            Err(CreateError::NotFound(Entity::Muscle))
        ));
        assert_eq!(muscles, vec![muscle("Chest", &[])]);
    }

    #[test]
    fn test_create_exercise_conflict() {
        let mut muscles = vec![muscle("Chest", &["Bench Press", "Fly"])];
        let before = muscles.clone();
        assert!(matches!(
            create_exercise(&mut muscles, &name("Chest"), name("Fly")),
            Err(CreateError::Conflict(Entity::Exercise))
        ));
        assert_eq!(muscles, before);
    }

    #[test]
    fn test_create_exercise_same_name_in_other_muscle() {
        let mut muscles = vec![muscle("Chest", &["Press"]), muscle("Shoulders", &[])];
        create_exercise(&mut muscles, &name("Shoulders"), name("Press")).unwrap();
        assert_eq!(
            muscles,
            vec![muscle("Chest", &["Press"]), muscle("Shoulders", &["Press"])]
        );
    }

    #[test]
    fn test_set_exercise_type() {
        let mut muscles = vec![muscle("Chest", &["Bench Press", "Fly"])];
        set_exercise_type(
            &mut muscles,
            &name("Chest"),
            &name("Bench Press"),
            TrainingType::Machine,
        )
        .unwrap();
        let exercise = set_exercise_type(
            &mut muscles,
            &name("Chest"),
            &name("Bench Press"),
            TrainingType::FreeWeight,
        )
        .unwrap();
        assert!(exercise.is_free_weight);
        assert!(exercise.is_machine);
        assert!(!exercise.is_body_weight);
        assert_eq!(muscles[0].exercises[0], exercise);
        assert_eq!(muscles[0].exercises[1], Exercise::new(name("Fly")));
    }

    #[rstest]
    #[case::missing_muscle("Back", "Bench Press", Entity::Muscle)]
    #[case::missing_exercise("Chest", "Dips", Entity::Exercise)]
    fn test_set_exercise_type_not_found(
        #[case] muscle_name: &str,
        #[case] exercise_name: &str,
        #[case] entity: Entity,
    ) {
        let mut muscles = vec![muscle("Chest", &["Bench Press"])];
        let before = muscles.clone();
        assert!(matches!(
            set_exercise_type(
                &mut muscles,
                &name(muscle_name),
                &name(exercise_name),
                TrainingType::BodyWeight
            ),
            Err(UpdateError::NotFound(e)) if e == entity
        ));
        assert_eq!(muscles, before);
    }

    #[test]
    fn test_append_history_entry() {
        let mut muscles = vec![muscle("Chest", &["Bench Press"])];
        let entry = details().into_entry(date());
        assert_eq!(
            append_history_entry(
                &mut muscles,
                &name("Chest"),
                &name("Bench Press"),
                TrainingType::FreeWeight,
                entry.clone()
            )
            .unwrap(),
            entry
        );
        let history = &muscles[0].exercises[0].history;
        assert_eq!(history.entries(TrainingType::FreeWeight), &[entry]);
        assert!(!history.contains(TrainingType::Machine));
        assert!(!muscles[0].exercises[0].is_free_weight);
    }

    #[rstest]
    #[case::missing_muscle("Back", "Bench Press", Entity::Muscle)]
    #[case::missing_exercise("Chest", "Dips", Entity::Exercise)]
    fn test_append_history_entry_not_found(
        #[case] muscle_name: &str,
        #[case] exercise_name: &str,
        #[case] entity: Entity,
    ) {
        let mut muscles = vec![muscle("Chest", &["Bench Press"])];
        let before = muscles.clone();
        assert!(matches!(
            append_history_entry(
                &mut muscles,
                &name(muscle_name),
                &name(exercise_name),
                TrainingType::FreeWeight,
                details().into_entry(date())
            ),
            Err(UpdateError::NotFound(e)) if e == entity
        ));
        assert_eq!(muscles, before);
    }

    #[rstest]
    #[case::free_weight(Some(EditType::FreeWeight))]
    #[case::machine(Some(EditType::Machine))]
    #[case::none(None)]
    fn test_edit_exercise(#[case] edit_type: Option<EditType>) {
        let mut muscles = vec![muscle("Chest", &["Bench Press"])];
        let exercise = edit_exercise(
            &mut muscles,
            &name("Chest"),
            &name("Bench Press"),
            &snapshot(),
            edit_type,
            date(),
        )
        .unwrap();
        assert_eq!(exercise.weight, Some(snapshot().weight));
        assert_eq!(exercise.reps, Some(snapshot().reps));
        assert_eq!(exercise.sets, Some(snapshot().sets));
        for t in TrainingType::ALL {
            if Some(t) == edit_type.map(TrainingType::from) {
                assert_eq!(exercise.history.entries(t), &[snapshot().to_entry(date())]);
            } else {
                assert!(exercise.history.entries(t).is_empty());
            }
        }
        assert_eq!(muscles[0].exercises[0], exercise);
    }

    #[test]
    fn test_edit_exercise_not_found() {
        let mut muscles = vec![muscle("Chest", &["Bench Press"])];
        assert!(matches!(
            edit_exercise(
                &mut muscles,
                &name("Chest"),
                &name("Fly"),
                &snapshot(),
                Some(EditType::Machine),
                date()
            ),
            Err(UpdateError::NotFound(Entity::Exercise))
        ));
        assert_eq!(muscles, vec![muscle("Chest", &["Bench Press"])]);
    }

    #[test]
    fn test_delete_exercise() {
        let mut muscles = vec![
            muscle("Chest", &["Press", "Fly"]),
            muscle("Shoulders", &["Press"]),
        ];
        assert_eq!(
            delete_exercise(&mut muscles, &name("Chest"), &name("Press")).unwrap(),
            name("Press")
        );
        assert_eq!(
            muscles,
            vec![muscle("Chest", &["Fly"]), muscle("Shoulders", &["Press"])]
        );
    }

    #[rstest]
    #[case::missing_muscle("Back", "Press", Entity::Muscle)]
    #[case::missing_exercise("Chest", "Dips", Entity::Exercise)]
    fn test_delete_exercise_not_found(
        #[case] muscle_name: &str,
        #[case] exercise_name: &str,
        #[case] entity: Entity,
    ) {
        let mut muscles = vec![muscle("Chest", &["Press"])];
        assert!(matches!(
            delete_exercise(&mut muscles, &name(muscle_name), &name(exercise_name)),
            Err(DeleteError::NotFound(e)) if e == entity
        ));
        assert_eq!(muscles, vec![muscle("Chest", &["Press"])]);
    }

    #[test]
    fn test_exercises_by_training_type() {
        let mut chest = muscle("Chest", &["Bench Press", "Fly", "Push Up"]);
        chest.exercises[0].set_type(TrainingType::FreeWeight);
        chest.exercises[0].set_type(TrainingType::Machine);
        chest.exercises[2].set_type(TrainingType::BodyWeight);

        let categorized = chest.exercises_by_training_type();

        let names = |t: Option<TrainingType>| {
            categorized[&t]
                .iter()
                .map(|e| e.name.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(categorized.len(), 4);
        assert_eq!(names(None), vec!["Fly"]);
        assert_eq!(names(Some(TrainingType::FreeWeight)), vec!["Bench Press"]);
        assert_eq!(names(Some(TrainingType::Machine)), vec!["Bench Press"]);
        assert_eq!(names(Some(TrainingType::BodyWeight)), vec!["Push Up"]);
    }
}
