use std::collections::VecDeque;

use log::debug;
use repbook_app::log as app_log;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::{KeyValueError, KeyValueStore, document, domain};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(AsRefStr, Debug, Clone, Copy)]
pub enum Key {
    #[strum(serialize = "muscles")]
    Muscles,
    #[strum(serialize = "passedIntro")]
    PassedIntro,
    #[strum(serialize = "age")]
    Age,
    #[strum(serialize = "weight")]
    Weight,
    #[strum(serialize = "preferredWeight")]
    PreferredWeight,
    #[strum(serialize = "log")]
    Log,
}

/// Repository keeping all application state as string values in a key-value store.
#[derive(Debug, Clone)]
pub struct LocalStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn get(&self, key: Key) -> Result<Option<String>, KeyValueError> {
        self.store.get_item(key.as_ref())
    }

    fn set(&self, key: Key, value: &str) -> Result<(), KeyValueError> {
        self.store.set_item(key.as_ref(), value)
    }

    fn get_json<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, domain::StorageError> {
        self.get(key)?
            .map(|value| {
                serde_json::from_str(&value)
                    .map_err(|err| domain::CorruptDocumentError::new(key.as_ref(), err).into())
            })
            .transpose()
    }

    fn set_json<T: Serialize + ?Sized>(
        &self,
        key: Key,
        value: &T,
    ) -> Result<(), domain::StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|err| domain::StorageError::Other(err.into()))?;
        Ok(self.set(key, &json)?)
    }

    fn get_parsed<T, E: ToString>(
        &self,
        key: Key,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<Option<T>, domain::StorageError> {
        self.get(key)?
            .map(|value| {
                parse(value.as_str())
                    .map_err(|err| domain::CorruptDocumentError::new(key.as_ref(), err).into())
            })
            .transpose()
    }
}

impl<S: KeyValueStore> domain::MuscleRepository for LocalStorage<S> {
    async fn read_muscles(&self) -> Result<Vec<domain::Muscle>, domain::ReadError> {
        let Some(json) = self.get(Key::Muscles).map_err(domain::StorageError::from)? else {
            debug!("no muscles stored yet");
            return Ok(vec![]);
        };
        document::parse(&json).map_err(|err| {
            domain::StorageError::from(domain::CorruptDocumentError::new(
                Key::Muscles.as_ref(),
                err,
            ))
            .into()
        })
    }

    async fn write_muscles(&self, muscles: &[domain::Muscle]) -> Result<(), domain::StorageError> {
        let json =
            document::serialize(muscles).map_err(|err| domain::StorageError::Other(err.into()))?;
        Ok(self.set(Key::Muscles, &json)?)
    }
}

impl<S: KeyValueStore> domain::ProfileRepository for LocalStorage<S> {
    async fn read_profile(&self) -> Result<Option<domain::Profile>, domain::ReadError> {
        let age = self.get_parsed(Key::Age, |v| domain::Age::try_from(v))?;
        let weight = self.get_parsed(Key::Weight, |v| domain::BodyWeight::try_from(v))?;
        let preferred_weight =
            self.get_parsed(Key::PreferredWeight, |v| domain::BodyWeight::try_from(v))?;
        match (age, weight, preferred_weight) {
            (Some(age), Some(weight), Some(preferred_weight)) => Ok(Some(domain::Profile {
                age,
                weight,
                preferred_weight,
            })),
            _ => Ok(None),
        }
    }

    async fn write_profile(&self, profile: &domain::Profile) -> Result<(), domain::StorageError> {
        self.set(Key::Age, &profile.age.to_string())?;
        self.set(Key::Weight, &profile.weight.to_string())?;
        self.set(Key::PreferredWeight, &profile.preferred_weight.to_string())?;
        self.set(Key::PassedIntro, "true")?;
        Ok(())
    }

    async fn read_passed_intro(&self) -> Result<bool, domain::ReadError> {
        Ok(self
            .get(Key::PassedIntro)
            .map_err(domain::StorageError::from)?
            .is_some_and(|value| value == "true"))
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> app_log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<app_log::Entry>, app_log::Error> {
        Ok(self
            .get_json(Key::Log)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))?
            .unwrap_or_default())
    }

    fn write_entry(&self, entry: app_log::Entry) -> Result<(), app_log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        self.set_json(Key::Log, &entries)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))
    }
}
