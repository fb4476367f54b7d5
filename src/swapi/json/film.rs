use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;

use crate::swapi::model::Model;
use crate::swapi::resource::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Custom wrapper for SWAPI's representation of a single film.
pub struct Film {
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: NaiveDate,
    pub characters: Vec<Url>,
    pub planets: Vec<Url>,
    pub starships: Vec<Url>,
    pub vehicles: Vec<Url>,
    pub species: Vec<Url>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: Url,
}

impl Model for Film {
    const RESOURCE: Resource = Resource::Films;
}

impl Display for Film {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Film: {}", self.title)
    }
}
