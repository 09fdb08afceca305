//! Messages shown to the user after an action.

use repbook_domain::{
    AgeError, CreateError, DeleteError, Entity, Name, ReadError, UpdateError, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateMuscle,
    DeleteMuscle,
    LoadExercise,
    CreateExercise,
    SetExerciseType,
    AppendHistoryEntry,
    EditExercise,
    DeleteExercise,
    CompleteIntro,
}

/// Reason an action could not be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Missing,
    NotFound(Entity),
    Conflict,
    Storage,
}

impl From<&ReadError> for Failure {
    fn from(value: &ReadError) -> Self {
        match value {
            ReadError::NotFound(entity) => Failure::NotFound(*entity),
            ReadError::Storage(_) | ReadError::Other(_) => Failure::Storage,
        }
    }
}

impl From<&CreateError> for Failure {
    fn from(value: &CreateError) -> Self {
        match value {
            CreateError::Conflict(_) => Failure::Conflict,
            CreateError::NotFound(entity) => Failure::NotFound(*entity),
            CreateError::Storage(_) | CreateError::Other(_) => Failure::Storage,
        }
    }
}

impl From<&UpdateError> for Failure {
    fn from(value: &UpdateError) -> Self {
        match value {
            UpdateError::Invalid(ValidationError::Missing(_)) => Failure::Missing,
            UpdateError::Invalid(ValidationError::Conflict(_)) => Failure::Conflict,
            UpdateError::NotFound(entity) => Failure::NotFound(*entity),
            UpdateError::Invalid(ValidationError::Other(_))
            | UpdateError::Storage(_)
            | UpdateError::Other(_) => Failure::Storage,
        }
    }
}

impl From<&DeleteError> for Failure {
    fn from(value: &DeleteError) -> Self {
        match value {
            DeleteError::NotFound(entity) => Failure::NotFound(*entity),
            DeleteError::Storage(_) | DeleteError::Other(_) => Failure::Storage,
        }
    }
}

impl Alert {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Confirmation of a successful action. Actions that navigate away on success have none.
    #[must_use]
    pub fn success(action: Action) -> Option<Self> {
        let message = match action {
            Action::SetExerciseType => "Exercise type updated successfully.",
            Action::AppendHistoryEntry => "Exercise details added successfully.",
            Action::EditExercise => "Exercise updated successfully.",
            Action::DeleteExercise => "Exercise deleted successfully.",
            Action::CreateMuscle
            | Action::DeleteMuscle
            | Action::LoadExercise
            | Action::CreateExercise
            | Action::CompleteIntro => return None,
        };
        Some(Self::new("Success", message))
    }

    #[must_use]
    pub fn confirm_delete_muscle(name: &Name) -> Self {
        Self::new(
            "Delete Muscle",
            format!("Are you sure you want to delete {name}?"),
        )
    }

    #[must_use]
    pub fn confirm_delete_exercise() -> Self {
        Self::new(
            "Confirm Delete",
            "Are you sure you want to delete this exercise?",
        )
    }

    #[must_use]
    pub fn failure(action: Action, failure: impl Into<Failure>) -> Self {
        match failure.into() {
            Failure::Missing => Self::missing(action),
            Failure::NotFound(Entity::Muscle) => Self::error("Muscle not found."),
            Failure::NotFound(Entity::Exercise) => Self::error("Exercise not found."),
            Failure::Conflict => Self::conflict(action),
            Failure::Storage => Self::error(match action {
                Action::CreateMuscle => "Unable to save muscle.",
                Action::DeleteMuscle => "Unable to delete muscle.",
                Action::LoadExercise => "Unable to fetch exercise data.",
                Action::CreateExercise => "Unable to save exercise.",
                Action::SetExerciseType => "Unable to update exercise type.",
                Action::AppendHistoryEntry => "Unable to save exercise details.",
                Action::EditExercise => "Unable to update exercise.",
                Action::DeleteExercise => "Unable to delete exercise.",
                Action::CompleteIntro => "Unable to save profile.",
            }),
        }
    }

    #[must_use]
    pub fn invalid(action: Action, error: &ValidationError) -> Self {
        match error {
            ValidationError::Missing(_) => Self::missing(action),
            ValidationError::Conflict(_) => Self::conflict(action),
            ValidationError::Other(err) => match err.downcast_ref::<AgeError>() {
                Some(err) => Self::new("Invalid Age", err.to_string()),
                None => Self::error(err.to_string()),
            },
        }
    }

    fn missing(action: Action) -> Self {
        match action {
            Action::CreateMuscle => Self::error("Please fill all the fields"),
            Action::CreateExercise => Self::error("Please enter a name"),
            Action::SetExerciseType => Self::error("Exercise or type is not selected."),
            Action::CompleteIntro => Self::new("Missing Information", "Please fill in all fields"),
            Action::DeleteMuscle
            | Action::LoadExercise
            | Action::AppendHistoryEntry
            | Action::EditExercise
            | Action::DeleteExercise => Self::error("Please fill in all the details."),
        }
    }

    fn conflict(action: Action) -> Self {
        match action {
            Action::CreateMuscle => {
                Self::error("Muscle already exists, please choose a different name")
            }
            _ => Self::error("Name is duplicated, please use another name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use repbook_domain::{Age, NameError, StorageError};

    use super::*;

    #[rstest]
    #[case(Action::SetExerciseType, Some("Exercise type updated successfully."))]
    #[case(Action::AppendHistoryEntry, Some("Exercise details added successfully."))]
    #[case(Action::EditExercise, Some("Exercise updated successfully."))]
    #[case(Action::DeleteExercise, Some("Exercise deleted successfully."))]
    #[case(Action::CreateMuscle, None)]
    fn test_success(#[case] action: Action, #[case] expected: Option<&str>) {
        assert_eq!(
            Alert::success(action),
            expected.map(|message| Alert::new("Success", message))
        );
    }

    #[rstest]
    #[case(
        Action::LoadExercise,
        &ReadError::NotFound(Entity::Muscle),
        "Muscle not found."
    )]
    #[case(
        Action::LoadExercise,
        &ReadError::NotFound(Entity::Exercise),
        "Exercise not found."
    )]
    #[case(
        Action::LoadExercise,
        &ReadError::Storage(StorageError::Other("disk full".into())),
        "Unable to fetch exercise data."
    )]
    fn test_read_failure(
        #[case] action: Action,
        #[case] error: &ReadError,
        #[case] expected: &str,
    ) {
        assert_eq!(Alert::failure(action, error), Alert::error(expected));
    }

    #[test]
    fn test_create_failure() {
        assert_eq!(
            Alert::failure(
                Action::CreateMuscle,
                &CreateError::Conflict(Entity::Muscle)
            ),
            Alert::error("Muscle already exists, please choose a different name")
        );
        assert_eq!(
            Alert::failure(
                Action::CreateExercise,
                &CreateError::Conflict(Entity::Exercise)
            ),
            Alert::error("Name is duplicated, please use another name")
        );
        assert_eq!(
            Alert::failure(
                Action::CreateExercise,
                &CreateError::NotFound(Entity::Muscle)
            ),
            Alert::error("Muscle not found.")
        );
    }

    #[rstest]
    #[case(Action::SetExerciseType, "Unable to update exercise type.")]
    #[case(Action::AppendHistoryEntry, "Unable to save exercise details.")]
    #[case(Action::EditExercise, "Unable to update exercise.")]
    fn test_update_failure(#[case] action: Action, #[case] expected: &str) {
        assert_eq!(
            Alert::failure(action, &UpdateError::Other("unexpected".into())),
            Alert::error(expected)
        );
    }

    #[test]
    fn test_update_failure_missing_field() {
        assert_eq!(
            Alert::failure(
                Action::AppendHistoryEntry,
                &UpdateError::Invalid(ValidationError::Missing("notes".to_string()))
            ),
            Alert::error("Please fill in all the details.")
        );
    }

    #[test]
    fn test_delete_failure() {
        assert_eq!(
            Alert::failure(
                Action::DeleteExercise,
                &DeleteError::Storage(StorageError::Other("disk full".into()))
            ),
            Alert::error("Unable to delete exercise.")
        );
        assert_eq!(
            Alert::failure(
                Action::DeleteExercise,
                &DeleteError::NotFound(Entity::Exercise)
            ),
            Alert::error("Exercise not found.")
        );
    }

    #[rstest]
    #[case(Action::CreateMuscle, Alert::error("Please fill all the fields"))]
    #[case(Action::CreateExercise, Alert::error("Please enter a name"))]
    #[case(
        Action::AppendHistoryEntry,
        Alert::error("Please fill in all the details.")
    )]
    #[case(
        Action::SetExerciseType,
        Alert::error("Exercise or type is not selected.")
    )]
    #[case(
        Action::CompleteIntro,
        Alert::new("Missing Information", "Please fill in all fields")
    )]
    fn test_invalid_missing(#[case] action: Action, #[case] expected: Alert) {
        assert_eq!(
            Alert::invalid(action, &ValidationError::Missing("name".to_string())),
            expected
        );
    }

    #[test]
    fn test_invalid_other() {
        assert_eq!(
            Alert::invalid(
                Action::CompleteIntro,
                &ValidationError::Other(Age::try_from("130").unwrap_err().into())
            ),
            Alert::new("Invalid Age", "Please enter a valid age between 0 and 120")
        );
        assert_eq!(
            Alert::invalid(
                Action::CreateMuscle,
                &ValidationError::Other(NameError::Empty.into())
            ),
            Alert::error(NameError::Empty.to_string())
        );
        assert_eq!(
            Alert::invalid(
                Action::CreateMuscle,
                &ValidationError::Conflict("name".to_string())
            ),
            Alert::error("Muscle already exists, please choose a different name")
        );
    }

    #[test]
    fn test_confirm_delete_muscle() {
        assert_eq!(
            Alert::confirm_delete_muscle(&Name::new("Chest").unwrap()).message,
            "Are you sure you want to delete Chest?"
        );
        assert_eq!(
            Alert::confirm_delete_exercise().title,
            "Confirm Delete"
        );
    }
}
