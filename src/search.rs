//! Debounced destination search.
//!
//! Every call to [`SuggestionSearch::search`] supersedes the calls before it:
//! their in-flight lookups are aborted, and a lookup that still completes
//! after a newer call was issued is reported as [`SearchOutcome::Superseded`]
//! instead of its suggestions.

use futures::future::{AbortHandle, Abortable};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::entities::PlaceSuggestion;
use crate::error::Error;
use crate::external::PlacesProvider;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Queries shorter than this (after trimming) are not sent to the provider.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Suggestions(Vec<PlaceSuggestion>),
    Superseded,
}

pub struct SuggestionSearch<P: ?Sized> {
    places: Arc<P>,
    debounce: Duration,
    latest: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl<P> SuggestionSearch<P>
where
    P: PlacesProvider + Send + Sync + ?Sized,
{
    pub fn new(places: Arc<P>) -> Self {
        Self {
            places,
            debounce: DEFAULT_DEBOUNCE,
            latest: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Id of the most recently issued search.
    pub fn latest_request_id(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, Error> {
        let query = query.trim().to_string();
        let is_short = query.chars().count() < MIN_QUERY_CHARS;

        let (abort_handle, registration) = AbortHandle::new_pair();

        // ids are handed out under the lock so the stored handle is always the newest call's
        let request_id = {
            let mut in_flight = self.in_flight.lock().await;
            let request_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

            let handle = if is_short { None } else { Some(abort_handle) };
            if let Some(previous) = std::mem::replace(&mut *in_flight, handle) {
                previous.abort();
            }

            request_id
        };

        if is_short {
            return Ok(SearchOutcome::Suggestions(vec![]));
        }

        let places = self.places.clone();
        let debounce = self.debounce;

        let lookup = async move {
            tokio::time::sleep(debounce).await;
            places.autocomplete(&query).await
        };

        let result = Abortable::new(lookup, registration).await;

        if request_id != self.latest_request_id() {
            tracing::debug!(request_id, "dropping superseded suggestions");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(Ok(suggestions)) => Ok(SearchOutcome::Suggestions(suggestions)),
            Ok(Err(err)) => Err(err),
            Err(_aborted) => Ok(SearchOutcome::Superseded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Place;
    use crate::error::upstream_error;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct SlowPlaces {
        started: AtomicUsize,
        completed: AtomicUsize,
    }

    impl SlowPlaces {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                started: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
            })
        }
    }

    fn suggestion(description: &str) -> PlaceSuggestion {
        PlaceSuggestion {
            place_id: description.to_lowercase(),
            description: description.into(),
        }
    }

    // "slow ..." queries answer after 300ms, everything else after 10ms.
    #[async_trait]
    impl PlacesProvider for SlowPlaces {
        async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
            self.started.fetch_add(1, Ordering::SeqCst);

            let delay = if input.starts_with("slow") { 300 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.completed.fetch_add(1, Ordering::SeqCst);

            if input == "fail" {
                return Err(upstream_error());
            }

            Ok(vec![suggestion(input)])
        }

        async fn place_details(&self, _: &str) -> Result<Option<Place>, Error> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn single_search_test() {
        let search = SuggestionSearch::new(SlowPlaces::new()).with_debounce(Duration::ZERO);

        let outcome = search.search("  Palas ").await.unwrap();

        assert_eq!(outcome, SearchOutcome::Suggestions(vec![suggestion("Palas")]));
        assert_eq!(search.latest_request_id(), 1);
    }

    #[tokio::test]
    async fn latest_search_wins_test() {
        let places = SlowPlaces::new();
        let search = SuggestionSearch::new(places.clone()).with_debounce(Duration::ZERO);

        let (first, second) = tokio::join!(search.search("slow Pala"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            search.search("Palas").await
        });

        assert_eq!(first.unwrap(), SearchOutcome::Superseded);
        assert_eq!(
            second.unwrap(),
            SearchOutcome::Suggestions(vec![suggestion("Palas")])
        );

        // the stale lookup was cancelled, not just ignored
        assert_eq!(places.started.load(Ordering::SeqCst), 2);
        assert_eq!(places.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn debounce_skips_provider_for_superseded_keystrokes_test() {
        let places = SlowPlaces::new();
        let search = SuggestionSearch::new(places.clone()).with_debounce(Duration::from_millis(100));

        let (first, second) = tokio::join!(search.search("Pa"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            search.search("Pal").await
        });

        assert_eq!(first.unwrap(), SearchOutcome::Superseded);
        assert_eq!(
            second.unwrap(),
            SearchOutcome::Suggestions(vec![suggestion("Pal")])
        );
        assert_eq!(places.started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn short_query_test() {
        let places = SlowPlaces::new();
        let search = SuggestionSearch::new(places.clone()).with_debounce(Duration::ZERO);

        for query in ["", " ", "P", " ș "] {
            let outcome = search.search(query).await.unwrap();
            assert_eq!(outcome, SearchOutcome::Suggestions(vec![]));
        }

        assert_eq!(places.started.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn short_query_supersedes_pending_search_test() {
        let search = SuggestionSearch::new(SlowPlaces::new()).with_debounce(Duration::ZERO);

        let (first, second) = tokio::join!(search.search("slow Palas"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            search.search("P").await
        });

        assert_eq!(first.unwrap(), SearchOutcome::Superseded);
        assert_eq!(second.unwrap(), SearchOutcome::Suggestions(vec![]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn one_search_applied_across_threads_test() {
        for _ in 0..50 {
            let search = Arc::new(
                SuggestionSearch::new(SlowPlaces::new()).with_debounce(Duration::from_millis(20)),
            );

            let calls: Vec<_> = (0..8)
                .map(|i| {
                    let search = search.clone();
                    tokio::spawn(async move { search.search(&format!("Palas {}", i)).await })
                })
                .collect();

            let mut applied = 0;
            for call in calls {
                if let SearchOutcome::Suggestions(_) = call.await.unwrap().unwrap() {
                    applied += 1;
                }
            }

            assert_eq!(applied, 1);
            assert_eq!(search.latest_request_id(), 8);
        }
    }

    #[tokio::test]
    async fn provider_error_test() {
        let search = SuggestionSearch::new(SlowPlaces::new()).with_debounce(Duration::ZERO);

        let err = search.search("fail").await.unwrap_err();
        assert!(err.is_upstream_error());
    }
}
