use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Muscle,
    Exercise,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Entity::Muscle => "muscle",
                Entity::Exercise => "exercise",
            }
        )
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("{0} not found")]
    NotFound(Entity),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("{0} already exists")]
    Conflict(Entity),
    #[error("{0} not found")]
    NotFound(Entity),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound(entity) => CreateError::NotFound(entity),
            ReadError::Storage(storage) => CreateError::Storage(storage),
            ReadError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(Entity),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound(entity) => UpdateError::NotFound(entity),
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("{0} not found")]
    NotFound(Entity),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound(entity) => DeleteError::NotFound(entity),
            ReadError::Storage(storage) => DeleteError::Storage(storage),
            ReadError::Other(other) => DeleteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    CorruptDocument(#[from] CorruptDocumentError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// A stored value that does not have the shape of the expected document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("corrupt document under key \"{key}\": {reason}")]
pub struct CorruptDocumentError {
    pub key: String,
    pub reason: String,
}

impl CorruptDocumentError {
    pub fn new(key: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(String),
    #[error("{0} already exists")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_error_from_read_error() {
        assert!(matches!(
            CreateError::from(ReadError::NotFound(Entity::Muscle)),
            CreateError::NotFound(Entity::Muscle)
        ));
        assert!(matches!(
            CreateError::from(ReadError::Storage(StorageError::CorruptDocument(
                CorruptDocumentError::new("muscles", "expected array")
            ))),
            CreateError::Storage(StorageError::CorruptDocument(_))
        ));
        assert!(matches!(
            CreateError::from(ReadError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_update_error_from_read_error() {
        assert!(matches!(
            UpdateError::from(ReadError::NotFound(Entity::Exercise)),
            UpdateError::NotFound(Entity::Exercise)
        ));
        assert!(matches!(
            UpdateError::from(ReadError::Other("foo".into())),
            UpdateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_delete_error_from_read_error() {
        assert!(matches!(
            DeleteError::from(ReadError::NotFound(Entity::Muscle)),
            DeleteError::NotFound(Entity::Muscle)
        ));
        assert!(matches!(
            DeleteError::from(ReadError::Other("foo".into())),
            DeleteError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ReadError::NotFound(Entity::Exercise).to_string(),
            "exercise not found"
        );
        assert_eq!(
            CreateError::Conflict(Entity::Muscle).to_string(),
            "muscle already exists"
        );
        assert_eq!(
            StorageError::from(CorruptDocumentError::new("muscles", "missing field `name`"))
                .to_string(),
            "corrupt document under key \"muscles\": missing field `name`"
        );
        assert_eq!(
            ValidationError::Missing("notes".to_string()).to_string(),
            "notes is required"
        );
    }
}
