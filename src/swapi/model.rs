//! The object-oriented entry point into SWAPI: `Model::get` for single entities, `Model::all` for
//! lazily-paginated collections.

use serde::de::DeserializeOwned;

use crate::nested;
use crate::swapi::client::connector::SwapiConnector;
use crate::swapi::queryset::QuerySet;
use crate::swapi::resource::Resource;
use crate::SwapiError;

/// Trait for any and all `type`s representing a SWAPI resource entity.
///
/// Implementors only declare which [`Resource`] they map to; the fetching operations come for
/// free. The `resource -> model` association being an associated `const` means the whole dispatch
/// is resolved at compile time.
pub trait Model: DeserializeOwned + Clone {
    /// The SWAPI resource type this model maps to.
    const RESOURCE: Resource;

    /// Returns a single entity of the current Model by requesting its data to SWAPI through the
    /// supplied `connector`.
    ///
    /// Whatever error the connector raises (ie: [`SwapiError::ResourceNotFound`] for an id the API
    /// does not have) propagates unchanged; no handling happens at this level.
    fn get(connector: &dyn SwapiConnector, id: u64) -> Result<Self, SwapiError> {
        let json = connector.get_resource(Self::RESOURCE, id)?;

        serde_json::from_value(json).map_err(|e| SwapiError::JsonParseError {
            msg: format!(
                "SWAPI's [{}] entity with id [{}] did not match the expected model shape",
                Self::RESOURCE,
                id
            ),
            nested: nested!(e),
        })
    }

    /// Returns an iterable [`QuerySet`] of the current Model. The QuerySet will be later in charge
    /// of performing requests to SWAPI for each of the pages while looping; no request is made at
    /// this point.
    fn all(connector: &dyn SwapiConnector) -> QuerySet<'_, Self> {
        QuerySet::new(connector)
    }
}
