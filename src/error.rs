//!A universal, project-wide error wrapper that is also able to retain the nested cause of an [`Error`].

use thiserror::Error;

use crate::swapi::resource::Resource;

#[derive(Error, Debug)]
pub enum SwapiError {
    // :# prints causes as well using anyhow's default formatting of causes
    #[error("SWAPI request to [{url}] failed; nested = {nested:#?}")]
    RequestError {
        url: String,
        #[source]
        nested: anyhow::Error,
    },
    #[error("SWAPI answered [{url}] with an unexpected status [{status}]")]
    ApiError { url: String, status: u16 },
    #[error("SWAPI has no [{resource}] resource with id [{id}]")]
    ResourceNotFound { resource: Resource, id: u64 },
    #[error("SWAPI has no page [{page}] for resource [{resource}]")]
    PageNotFound { resource: Resource, page: u32 },
    #[error("JSON parse error: {msg}; nested = {nested:#?}")]
    JsonParseError {
        msg: String,
        #[source]
        nested: anyhow::Error,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SwapiError {
    /// Whether this error is SWAPI's way of reporting that a requested page lies past the end of a
    /// resource's collection (an HTTP 404 on a past-the-end page number). Querysets consume this
    /// condition as a normal end-of-data signal instead of surfacing it.
    pub fn is_page_exhausted(&self) -> bool {
        matches!(self, SwapiError::PageNotFound { .. })
    }
}

#[macro_export]
/// Wraps a dynamic error type into an [`anyhow::Error`]. Useful in a plethora of cases for constructing
/// [`SwapiError`]s.
macro_rules! nested {
    ($source:expr) => {
        anyhow::Error::new($source)
    };
}
