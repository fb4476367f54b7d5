//! A typed client for the Star Wars API (SWAPI).
//!
//! The two supported resource types ([`Person`](swapi::json::people::Person) and
//! [`Film`](swapi::json::film::Film)) are reachable through the [`Model`](swapi::model::Model)
//! trait: `Model::get(&connector, id)` for a single entity, `Model::all(&connector)` for a
//! [`QuerySet`](swapi::queryset::QuerySet) that lazily pages through the whole collection.

pub mod error;

pub mod swapi;

pub use error::SwapiError;
