//! The lazily-paginated collection over a SWAPI resource.

use std::fmt::{Display, Formatter};

use anyhow::anyhow;
use log::{debug, trace};

use crate::nested;
use crate::swapi::client::connector::SwapiConnector;
use crate::swapi::model::Model;
use crate::SwapiError;

/// A lazy, forward-only sequence over *all* entities of one SWAPI resource type.
///
/// Pages are requested from the supplied connector one at a time, and only when iteration (or a
/// [`total_count()`](QuerySet::total_count) on a fresh queryset) actually needs them. Every fetched entity is
/// retained in an append-only buffer in fetch order, so consuming the queryset never re-requests a
/// page it has already seen.
///
/// A queryset is not restartable; construct a new one (via
/// [`Model::all`]) to iterate again.
pub struct QuerySet<'c, M: Model> {
    connector: &'c dyn SwapiConnector,
    /// Concatenation of all elements obtained in the successive page requests so far. Meaning
    /// that, with 10 results per page, after requesting the second page there will be 20 elements
    /// in here.
    objects: Vec<M>,
    /// Index of the next unconsumed element within `objects`. Always <= `objects.len()`.
    current_element: usize,
    /// The next page number to request. SWAPI pages start at 1.
    current_page: u32,
    /// Total count of entities as reported by the API. Unknown until the first page response
    /// arrives; stable across pages afterwards.
    total_count: Option<u64>,
    /// Set once a page fetch fails or signals there is no further data. No fetch is ever attempted
    /// again afterwards.
    exhausted: bool,
}

impl<'c, M: Model> QuerySet<'c, M> {
    /// Instantiates a fresh, empty [`QuerySet`]. No requests are performed until iteration starts.
    pub fn new(connector: &'c dyn SwapiConnector) -> Self {
        QuerySet {
            connector,
            objects: Vec::new(),
            current_element: 0,
            current_page: 1,
            total_count: None,
            exhausted: false,
        }
    }

    /// Returns the total count of entities of the current model, as reported by the API.
    ///
    /// (Named `total_count` rather than `count` so it cannot be shadowed by the by-value
    /// [`Iterator::count`], which method resolution would pick first at every call site.)
    ///
    /// If the counter has not been obtained yet, a single page request is performed in order to
    /// get it; the fetched page's entities stay buffered and feed subsequent iteration (meaning
    /// page 1 is never requested twice). A first fetch answering with page-not-found is
    /// indistinguishable from an empty resource set, so it yields a count of `0`; any other
    /// transport failure propagates. A collection that already terminated on a failed fetch
    /// *before* the API ever reported a total keeps failing here, instead of posing as empty.
    pub fn total_count(&mut self) -> Result<u64, SwapiError> {
        if self.total_count.is_none() && !self.exhausted {
            match self.request_next_page() {
                Ok(()) => {}
                Err(e) if e.is_page_exhausted() => {
                    trace!("{} has no first page; reporting an empty collection", self);
                    self.exhausted = true;
                    self.total_count = Some(0);
                }
                Err(e) => {
                    // a failed fetch terminates the collection; no further request is attempted
                    self.exhausted = true;
                    return Err(e);
                }
            }
        }

        self.total_count.ok_or_else(|| {
            SwapiError::Other(anyhow!(
                "the [{}] collection terminated on a failed fetch before SWAPI ever reported a total",
                M::RESOURCE
            ))
        })
    }

    /// The amount of entities fetched (not necessarily consumed) so far.
    pub fn fetched_len(&self) -> usize {
        self.objects.len()
    }

    /// Requests the next page of elements from the API based on the current state of the
    /// iteration, appending its entities to the buffer and recording the reported grand total.
    fn request_next_page(&mut self) -> Result<(), SwapiError> {
        debug!("requesting page {} of resource [{}]", self.current_page, M::RESOURCE);

        let page = self.connector.get_page(M::RESOURCE, self.current_page)?;

        // deserialize the whole page before touching the buffer, so a malformed entity halfway
        // through cannot leave earlier siblings behind for a terminated queryset to serve later
        let mut fetched: Vec<M> = Vec::with_capacity(page.results.len());
        for resource_data in page.results {
            let object: M = serde_json::from_value(resource_data).map_err(|e| {
                SwapiError::JsonParseError {
                    msg: format!(
                        "entity on page [{}] of [{}] did not match the expected model shape",
                        self.current_page,
                        M::RESOURCE
                    ),
                    nested: nested!(e),
                }
            })?;
            fetched.push(object);
        }

        // the API repeats the same grand total on every page, so overwriting is harmless
        self.total_count = Some(page.count);
        self.objects.extend(fetched);

        trace!(
            "page {} of [{}] fetched; buffer now holds {} of {} total entities",
            self.current_page,
            M::RESOURCE,
            self.objects.len(),
            page.count
        );

        self.current_page += 1;

        Ok(())
    }
}

impl<M: Model> Iterator for QuerySet<'_, M> {
    type Item = Result<M, SwapiError>;

    /// Produces the next entity, requesting the next page from SWAPI when all elements of the
    /// current buffer were already consumed.
    ///
    /// Page-not-found from the API is the normal end-of-sequence signal and yields `None`. Any
    /// other fetch failure is yielded once as an `Err`, after which the queryset is exhausted for
    /// good: further calls keep returning `None` (no resurrection).
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_element + 1 > self.objects.len() {
            if self.exhausted {
                return None;
            }

            // get next page
            match self.request_next_page() {
                Ok(()) => {}
                Err(e) if e.is_page_exhausted() => {
                    self.exhausted = true;
                    // a missing first page is the API's rendition of an empty collection
                    self.total_count.get_or_insert(0);
                    return None;
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }

            if self.current_element + 1 > self.objects.len() {
                // the page fetch succeeded but brought nothing new (an empty `results` array);
                // there is nothing further to consume
                self.exhausted = true;
                return None;
            }
        }

        let elem = self.objects[self.current_element].clone();
        self.current_element += 1;

        Some(Ok(elem))
    }
}

impl<M: Model> Display for QuerySet<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} queryset: {} objects", M::RESOURCE, self.objects.len())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::swapi::client::connector::MockSwapiConnector;
    use crate::swapi::json::page::Page;
    use crate::swapi::json::people::Person;
    use crate::swapi::model::Model;
    use crate::swapi::resource::Resource;
    use crate::SwapiError;

    fn person_json(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": "male",
            "homeworld": "https://swapi.dev/api/planets/1/",
            "films": ["https://swapi.dev/api/films/1/"],
            "species": [],
            "vehicles": [],
            "starships": [],
            "created": "2014-12-09T13:50:51.644000Z",
            "edited": "2014-12-20T21:17:56.891000Z",
            "url": "https://swapi.dev/api/people/1/"
        })
    }

    fn page_of(count: u64, names: &[&str]) -> Page<serde_json::Value> {
        Page {
            count,
            next: None,
            previous: None,
            results: names.iter().map(|name| person_json(name)).collect(),
        }
    }

    #[test]
    fn a_fresh_queryset_performs_no_requests() {
        let connector = MockSwapiConnector::new(); // no expectations: any call would panic
        let queryset = Person::all(&connector);

        assert_eq!(queryset.fetched_len(), 0);
    }

    #[test]
    fn total_count_on_a_fresh_queryset_fetches_exactly_one_page_and_keeps_its_entities() {
        let mut connector = MockSwapiConnector::new();
        connector
            .expect_get_page()
            .withf(|resource, page| *resource == Resource::People && *page == 1)
            .times(1)
            .returning(|_, _| Ok(page_of(2, &["Luke Skywalker", "C-3PO"])));

        let mut queryset = Person::all(&connector);

        assert_eq!(queryset.total_count().unwrap(), 2);
        // second call must answer from the cached total (the mock would panic on a re-fetch)
        assert_eq!(queryset.total_count().unwrap(), 2);
        assert_eq!(queryset.fetched_len(), 2);
    }

    #[test]
    fn total_count_reports_zero_when_the_first_page_does_not_exist() {
        let mut connector = MockSwapiConnector::new();
        connector.expect_get_page().times(1).returning(|resource, page| {
            Err(SwapiError::PageNotFound { resource, page })
        });

        let mut queryset = Person::all(&connector);

        assert_eq!(queryset.total_count().unwrap(), 0);
        // the queryset is exhausted; counting again must not trigger another fetch
        assert_eq!(queryset.total_count().unwrap(), 0);
        assert!(queryset.next().is_none());
    }

    #[test]
    fn total_count_propagates_transport_failures_other_than_page_exhaustion() {
        let mut connector = MockSwapiConnector::new();
        connector.expect_get_page().returning(|_, _| {
            Err(SwapiError::ApiError {
                url: "https://swapi.dev/api/people/?page=1".to_string(),
                status: 500,
            })
        });

        let mut queryset = Person::all(&connector);

        assert!(matches!(queryset.total_count(), Err(SwapiError::ApiError { status: 500, .. })));
    }

    #[test]
    fn total_count_keeps_failing_after_iteration_died_without_an_api_reported_total() {
        let mut connector = MockSwapiConnector::new();
        connector.expect_get_page().times(1).returning(|_, _| {
            Err(SwapiError::ApiError {
                url: "https://swapi.dev/api/people/?page=1".to_string(),
                status: 500,
            })
        });

        let mut queryset = Person::all(&connector);

        assert!(matches!(queryset.next(), Some(Err(SwapiError::ApiError { status: 500, .. }))));
        // the collection died before the API ever reported a total; it must not pose as empty
        // (the mock would panic if this call re-fetched)
        assert!(queryset.total_count().is_err());
    }

    #[test]
    fn a_successful_but_empty_page_terminates_iteration() {
        let mut connector = MockSwapiConnector::new();
        connector.expect_get_page().times(1).returning(|_, _| Ok(page_of(0, &[])));

        let mut queryset = Person::all(&connector);

        assert!(queryset.next().is_none());
        assert!(queryset.next().is_none());
    }

    #[test]
    fn a_malformed_entity_surfaces_as_a_json_parse_error() {
        let mut connector = MockSwapiConnector::new();
        connector.expect_get_page().times(1).returning(|_, _| {
            Ok(Page {
                count: 1,
                next: None,
                previous: None,
                results: vec![json!({"name": 42})],
            })
        });

        let mut queryset = Person::all(&connector);

        assert!(matches!(queryset.next(), Some(Err(SwapiError::JsonParseError { .. }))));
        // a failed fetch terminates the queryset for good
        assert!(queryset.next().is_none());
    }

    #[test]
    fn a_page_with_a_malformed_entity_buffers_none_of_its_siblings() {
        let mut connector = MockSwapiConnector::new();
        connector.expect_get_page().times(1).returning(|_, _| {
            Ok(Page {
                count: 2,
                next: None,
                previous: None,
                results: vec![person_json("Luke Skywalker"), json!({"name": 42})],
            })
        });

        let mut queryset = Person::all(&connector);

        assert!(matches!(queryset.next(), Some(Err(SwapiError::JsonParseError { .. }))));
        // the well-formed sibling must not survive the failed page; the queryset stays dead
        assert!(queryset.next().is_none());
        assert_eq!(queryset.fetched_len(), 0);
    }
}
