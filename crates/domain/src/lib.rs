#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod history;
mod muscle;
mod name;
mod profile;
mod service;
mod training;

pub use error::*;
pub use exercise::*;
pub use history::*;
pub use muscle::*;
pub use name::*;
pub use profile::*;
pub use service::*;
pub use training::*;
