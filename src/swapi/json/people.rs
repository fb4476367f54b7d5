use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;

use crate::swapi::model::Model;
use crate::swapi::resource::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Custom wrapper for SWAPI's representation of a single person.
///
/// Numeric-looking fields (`height`, `mass`) stay as `String`s because SWAPI serves them that way,
/// with values like `"unknown"` sprinkled in for the more obscure characters. Unknown fields in the
/// payload are silently ignored (the API may grow fields; rejecting them would break every
/// historical client).
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: Url,
    pub films: Vec<Url>,
    pub species: Vec<Url>,
    pub vehicles: Vec<Url>,
    pub starships: Vec<Url>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: Url,
}

impl Model for Person {
    const RESOURCE: Resource = Resource::People;
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Person: {}", self.name)
    }
}
