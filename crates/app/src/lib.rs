#![warn(clippy::pedantic)]

pub mod alert;
pub mod log;

pub use alert::{Action, Alert};
