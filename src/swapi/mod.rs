//! SWAPI's wrappers & fetching machinery. Everything ranging from the blocking
//! [`SwapiClient`](client::connector::SwapiClient) to the lazily-paginated
//! [`QuerySet`](queryset::QuerySet) over a [`Resource`](resource::Resource)'s entities is found in
//! this module.

pub mod json;

pub mod client;

pub mod model;

pub mod queryset;

pub mod resource;
