#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use repbook_domain as domain;

pub mod document;
pub mod file_store;
pub mod local_storage;
pub mod memory_store;

pub use file_store::FileStore;
pub use local_storage::LocalStorage;
pub use memory_store::MemoryStore;

/// String values stored under string keys.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), KeyValueError>;
    fn remove_item(&self, key: &str) -> Result<(), KeyValueError>;
}

#[derive(thiserror::Error, Debug)]
pub enum KeyValueError {
    #[error("invalid key \"{0}\"")]
    InvalidKey(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<KeyValueError> for domain::StorageError {
    fn from(value: KeyValueError) -> Self {
        domain::StorageError::Other(Box::new(value))
    }
}
