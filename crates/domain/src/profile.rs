use derive_more::{Display, Into};

use crate::{ReadError, StorageError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Option<Profile>, ReadError>;
    async fn passed_intro(&self) -> Result<bool, ReadError>;
    async fn complete_intro(&self, profile: Profile) -> Result<Profile, UpdateError>;

    fn validate_age(&self, age: &str) -> Result<Age, ValidationError> {
        if age.trim().is_empty() {
            return Err(ValidationError::Missing("age".to_string()));
        }
        Age::try_from(age).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_body_weight(&self, weight: &str) -> Result<BodyWeight, ValidationError> {
        if weight.trim().is_empty() {
            return Err(ValidationError::Missing("weight".to_string()));
        }
        BodyWeight::try_from(weight).map_err(|err| ValidationError::Other(err.into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<Profile>, ReadError>;
    /// Stores the profile and marks the intro as passed.
    async fn write_profile(&self, profile: &Profile) -> Result<(), StorageError>;
    async fn read_passed_intro(&self) -> Result<bool, ReadError>;
}

/// Personal data entered during the intro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub age: Age,
    pub weight: BodyWeight,
    pub preferred_weight: BodyWeight,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    pub fn new(value: u8) -> Result<Self, AgeError> {
        if value > 120 {
            return Err(AgeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Age {
    type Error = AgeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u8>() {
            Ok(parsed_value) => Age::new(parsed_value),
            Err(_) => Err(AgeError::OutOfRange),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AgeError {
    #[error("Please enter a valid age between 0 and 120")]
    OutOfRange,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct BodyWeight(f32);

impl BodyWeight {
    pub fn new(value: f32) -> Result<Self, BodyWeightError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(BodyWeightError::NotPositive);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for BodyWeight {
    type Error = BodyWeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => BodyWeight::new(parsed_value),
            Err(_) => Err(BodyWeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BodyWeightError {
    #[error("Weight must be a positive decimal number")]
    NotPositive,
    #[error("Weight must be a decimal number")]
    ParseError,
}
