//! Card database model for cardq.
//!
//! A [`CardRepository`] holds every [`Set`] and its [`Card`]s, loaded from a
//! JSON dump. Localized card text lives next to the English original and must
//! be present before search indexes can be built from the repository.

#![warn(missing_docs)]

mod card;
mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod power;
mod repository;

pub use card::{Card, FORMATS, LANGUAGES, Legality, Localization, Set};
pub use error::CardError;
pub use power::parse_power;
pub use repository::{CardRepository, LocalizationMap};
