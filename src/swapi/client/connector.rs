//! The transport layer against SWAPI's REST endpoints.
//!
//! [`SwapiConnector`] is the seam every model/queryset operation talks through; [`SwapiClient`] is
//! its production implementation, a thin wrapper over a blocking [`reqwest`] client. Connectors are
//! constructed explicitly and handed to each call site (no global shared instance), which keeps
//! their lifetime in the caller's hands and allows swapping in test doubles.
//!
//! ### Usage example:
//!
//! ```no_run
//! use swapi_client::swapi::client::connector::{SwapiClient, SwapiConnector};
//! use swapi_client::swapi::resource::Resource;
//!
//! let client = SwapiClient::new();
//! let luke = client.get_resource(Resource::People, 1);
//! ```

use log::{debug, trace};
use reqwest::blocking::Response;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::nested;
use crate::swapi::json::page::Page;
use crate::swapi::resource::Resource;
use crate::SwapiError;

/// SWAPI's public base URL. Used by [`SwapiClient::new`]; point the client elsewhere with
/// [`SwapiClient::with_base_url`] (ie: at a local fixture server).
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// Trait for any and all `type`s able to fetch SWAPI resources, either individually by id or one
/// page at a time.
///
/// Both operations return parsed-but-untyped JSON; deserializing into a concrete model is the
/// caller's business ([`Model`](crate::swapi::model::Model) and
/// [`QuerySet`](crate::swapi::queryset::QuerySet) take care of that).
#[cfg_attr(test, mockall::automock)]
pub trait SwapiConnector {
    /// Fetches a single entity of the given `resource` type by its `id`.
    ///
    /// Fails with [`SwapiError::ResourceNotFound`] when the API has no such entity, and with the
    /// corresponding [`SwapiError`] variant for any other transport-level failure.
    fn get_resource(&self, resource: Resource, id: u64) -> Result<Value, SwapiError>;

    /// Fetches one page of the given `resource` type's collection. Page numbering starts at 1.
    ///
    /// Fails with [`SwapiError::PageNotFound`] when `page` lies past the collection's last page
    /// (SWAPI reports this as an HTTP 404), and with the corresponding [`SwapiError`] variant for
    /// any other transport-level failure.
    fn get_page(&self, resource: Resource, page: u32) -> Result<Page<Value>, SwapiError>;
}

/// A blocking HTTP client for SWAPI.
pub struct SwapiClient {
    base_url: Url,
    http_client: reqwest::blocking::Client,
}

impl SwapiClient {
    /// Instantiates a new [`SwapiClient`] pointed at [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        // DEFAULT_BASE_URL is a compile-time constant known to parse
        SwapiClient::with_base_url(Url::parse(DEFAULT_BASE_URL).unwrap())
    }

    /// Instantiates a new [`SwapiClient`] pointed at an arbitrary base URL.
    pub fn with_base_url(base_url: Url) -> Self {
        SwapiClient {
            base_url,
            http_client: reqwest::blocking::Client::new(),
        }
    }

    /// Builds the endpoint URL for a resource collection (ie: `{base}/people/`) or for a single
    /// entity within it (ie: `{base}/people/4/`).
    fn endpoint_url(&self, resource: Resource, id: Option<u64>) -> Result<Url, SwapiError> {
        let path = match id {
            Some(id) => format!("{}/{}/", resource.path_segment(), id),
            None => format!("{}/", resource.path_segment()),
        };

        self.base_url.join(&path).map_err(|e| SwapiError::RequestError {
            url: format!("{}{}", self.base_url, path),
            nested: nested!(e),
        })
    }

    /// Performs a blocking GET against `url` and parses the response body as JSON.
    ///
    /// Any non-success HTTP status becomes a [`SwapiError::ApiError`] carrying the status code;
    /// the per-resource-vs-page 404 interpretation is left to the calling operation.
    fn get_json(&self, url: Url) -> Result<Value, SwapiError> {
        debug!("GET {}", url);

        let response: Response =
            self.http_client.get(url.clone()).send().map_err(|e| SwapiError::RequestError {
                url: url.to_string(),
                nested: nested!(e),
            })?;

        let status = response.status();
        trace!("{} answered with status {}", url, status);

        if !status.is_success() {
            return Err(SwapiError::ApiError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().map_err(|e| SwapiError::JsonParseError {
            msg: format!("could not parse response body from [{}] as JSON", url),
            nested: nested!(e),
        })
    }
}

impl Default for SwapiClient {
    fn default() -> Self {
        SwapiClient::new()
    }
}

impl SwapiConnector for SwapiClient {
    fn get_resource(&self, resource: Resource, id: u64) -> Result<Value, SwapiError> {
        let url = self.endpoint_url(resource, Some(id))?;

        match self.get_json(url) {
            Err(SwapiError::ApiError {
                status: s, ..
            }) if s == StatusCode::NOT_FOUND.as_u16() => {
                Err(SwapiError::ResourceNotFound { resource, id })
            }
            other => other,
        }
    }

    fn get_page(&self, resource: Resource, page: u32) -> Result<Page<Value>, SwapiError> {
        let mut url = self.endpoint_url(resource, None)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        let json = match self.get_json(url.clone()) {
            Err(SwapiError::ApiError {
                status: s, ..
            }) if s == StatusCode::NOT_FOUND.as_u16() => {
                return Err(SwapiError::PageNotFound { resource, page });
            }
            other => other?,
        };

        serde_json::from_value::<Page<Value>>(json).map_err(|e| SwapiError::JsonParseError {
            msg: format!("[{}] did not answer with a well-formed page envelope", url),
            nested: nested!(e),
        })
    }
}
