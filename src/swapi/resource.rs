//! Static enumeration of the SWAPI resource types this client knows how to fetch.

use strum_macros::{Display, EnumIter, EnumString};

/// Enumeration of the supported SWAPI resource types.
///
/// Each variant renders (and parses) as the exact path segment SWAPI uses for that resource's
/// endpoints (ie: `https://swapi.dev/api/people/`), which makes the mapping between a model type
/// and its endpoint a compile-time affair.
#[derive(Display, EnumIter, EnumString, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    People,
    Films,
}

impl Resource {
    /// Returns the path segment for this resource as used in SWAPI's endpoint URLs.
    pub fn path_segment(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn resources_render_as_swapi_path_segments() {
        assert_eq!(Resource::People.path_segment(), "people");
        assert_eq!(Resource::Films.path_segment(), "films");
    }

    #[test]
    fn resources_parse_back_from_their_path_segments() {
        assert_eq!(Resource::from_str("people").unwrap(), Resource::People);
        assert_eq!(Resource::from_str("films").unwrap(), Resource::Films);
        assert!(Resource::from_str("starships").is_err());
    }
}
