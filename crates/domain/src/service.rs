use std::collections::BTreeMap;

use chrono::Utc;
use log::{error, warn};

use crate::{
    CreateError, DeleteError, EditType, Entity, Exercise, ExerciseSnapshot, HistoryDetails, HistoryEntry,
    Muscle, MuscleRepository, MuscleService, Name, Profile, ProfileRepository, ProfileService,
    ReadError, StorageError, TrainingType, UpdateError, ValidationError, find_muscle, history_of,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R: MuscleRepository> Service<R> {
    /// Loads the document, applies `modify` and writes the document back if `modify` succeeded.
    async fn modify_muscles<T, E>(
        &self,
        modify: impl FnOnce(&mut Vec<Muscle>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<ReadError> + From<StorageError>,
    {
        let mut muscles = self.repository.read_muscles().await?;
        let result = modify(&mut muscles)?;
        self.repository.write_muscles(&muscles).await?;
        Ok(result)
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(_) | $error::Other(_) => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    warn!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: MuscleRepository> MuscleService for Service<R> {
    async fn get_muscles(&self) -> Result<Vec<Muscle>, ReadError> {
        log_on_error!(
            self.repository.read_muscles(),
            ReadError,
            "get",
            "muscles"
        )
    }

    async fn get_muscle(&self, muscle: &Name) -> Result<Muscle, ReadError> {
        let muscles = self.get_muscles().await?;
        log_on_error!(
            async {
                find_muscle(&muscles, muscle)
                    .cloned()
                    .ok_or(ReadError::NotFound(Entity::Muscle))
            },
            ReadError,
            "get",
            "muscle"
        )
    }

    async fn get_exercise(&self, muscle: &Name, exercise: &Name) -> Result<Exercise, ReadError> {
        let muscle = self.get_muscle(muscle).await?;
        log_on_error!(
            async {
                muscle
                    .exercise(exercise)
                    .cloned()
                    .ok_or(ReadError::NotFound(Entity::Exercise))
            },
            ReadError,
            "get",
            "exercise"
        )
    }

    async fn get_history(
        &self,
        muscle: &Name,
        exercise: &Name,
        training_type: TrainingType,
        group_name: &str,
    ) -> Result<Vec<HistoryEntry>, ReadError> {
        let exercise = self.get_exercise(muscle, exercise).await?;
        Ok(history_of(
            exercise.history.entries(training_type),
            group_name,
        ))
    }

    async fn get_exercises_by_training_type(
        &self,
        muscle: &Name,
    ) -> Result<BTreeMap<Option<TrainingType>, Vec<Exercise>>, ReadError> {
        Ok(self.get_muscle(muscle).await?.exercises_by_training_type())
    }

    async fn create_muscle(
        &self,
        name: Name,
        subtitle: Option<String>,
        image_uri: String,
    ) -> Result<Muscle, CreateError> {
        log_on_error!(
            self.modify_muscles(|muscles| {
                crate::muscle::create_muscle(muscles, Muscle::new(name, subtitle, image_uri))
            }),
            CreateError,
            "create",
            "muscle"
        )
    }

    async fn delete_muscle(&self, muscle: &Name) -> Result<Name, DeleteError> {
        log_on_error!(
            self.modify_muscles(|muscles| crate::muscle::delete_muscle(muscles, muscle)),
            DeleteError,
            "delete",
            "muscle"
        )
    }

    async fn create_exercise(&self, muscle: &Name, name: Name) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.modify_muscles(|muscles| crate::muscle::create_exercise(muscles, muscle, name)),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn set_exercise_type(
        &self,
        muscle: &Name,
        exercise: &Name,
        training_type: TrainingType,
    ) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.modify_muscles(|muscles| {
                crate::muscle::set_exercise_type(muscles, muscle, exercise, training_type)
            }),
            UpdateError,
            "set type of",
            "exercise"
        )
    }

    async fn append_history_entry(
        &self,
        muscle: &Name,
        exercise: &Name,
        training_type: TrainingType,
        details: HistoryDetails,
    ) -> Result<HistoryEntry, UpdateError> {
        log_on_error!(
            async {
                if details.notes.trim().is_empty() {
                    return Err(UpdateError::Invalid(ValidationError::Missing(
                        "notes".to_string(),
                    )));
                }
                let entry = details.into_entry(Utc::now());
                self.modify_muscles(|muscles| {
                    crate::muscle::append_history_entry(
                        muscles,
                        muscle,
                        exercise,
                        training_type,
                        entry,
                    )
                })
                .await
            },
            UpdateError,
            "append",
            "history entry"
        )
    }

    async fn edit_exercise(
        &self,
        muscle: &Name,
        exercise: &Name,
        snapshot: ExerciseSnapshot,
        edit_type: Option<EditType>,
    ) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.modify_muscles(|muscles| {
                crate::muscle::edit_exercise(
                    muscles,
                    muscle,
                    exercise,
                    &snapshot,
                    edit_type,
                    Utc::now(),
                )
            }),
            UpdateError,
            "edit",
            "exercise"
        )
    }

    async fn delete_exercise(&self, muscle: &Name, exercise: &Name) -> Result<Name, DeleteError> {
        log_on_error!(
            self.modify_muscles(|muscles| crate::muscle::delete_exercise(muscles, muscle, exercise)),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<Option<Profile>, ReadError> {
        log_on_error!(
            self.repository.read_profile(),
            ReadError,
            "get",
            "profile"
        )
    }

    async fn passed_intro(&self) -> Result<bool, ReadError> {
        log_on_error!(
            self.repository.read_passed_intro(),
            ReadError,
            "get",
            "intro state"
        )
    }

    async fn complete_intro(&self, profile: Profile) -> Result<Profile, UpdateError> {
        log_on_error!(
            async {
                self.repository.write_profile(&profile).await?;
                Ok::<_, UpdateError>(profile)
            },
            UpdateError,
            "store",
            "profile"
        )
    }
}
