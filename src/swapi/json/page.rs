use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Custom wrapper for a SWAPI paginated response.
///
/// `count` is the grand total of entities across *all* pages (a stable value the API repeats on
/// every page), while `results` holds just the slice of entities belonging to the requested page.
pub struct Page<T> {
    pub count: u64,
    pub next: Option<Url>,
    pub previous: Option<Url>,
    pub results: Vec<T>,
}
