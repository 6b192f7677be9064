//! Query debouncing
//!
//! Only the most recent query after a quiet period is issued. Each submission
//! bumps a shared generation counter; a submission re-checks the counter
//! after the quiet period and again after the network round-trip, and
//! discards itself if a newer submission has superseded it. Out-of-order
//! responses therefore never reach the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::errors::SearchError;
use crate::models::PlaceCandidate;
use crate::search::PlaceSearch;

/// Debouncing wrapper around a [`PlaceSearch`] implementation.
///
/// Clone-cheap: clones share the generation counter, so a clone's
/// submission supersedes in-flight submissions on the original.
#[derive(Clone)]
pub struct DebouncedSearch {
    inner: Arc<dyn PlaceSearch>,
    quiet_period: Duration,
    min_query_chars: usize,
    generation: Arc<AtomicU64>,
}

impl DebouncedSearch {
    pub fn new(inner: Arc<dyn PlaceSearch>, quiet_period: Duration, min_query_chars: usize) -> Self {
        Self {
            inner,
            quiet_period,
            min_query_chars,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a query.
    ///
    /// Returns `Ok(None)` when a newer submission superseded this one (the
    /// caller keeps whatever it is showing), `Ok(Some(results))` when this
    /// submission is still the latest. Queries below the minimum length
    /// short-circuit to an empty set, clearing the candidate list.
    pub async fn submit(&self, query: &str) -> Result<Option<Vec<PlaceCandidate>>, SearchError> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().chars().count() < self.min_query_chars {
            return Ok(Some(Vec::new()));
        }

        tokio::time::sleep(self.quiet_period).await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            trace!(query, "query superseded during quiet period");
            return Ok(None);
        }

        let results = self.inner.search(query).await?;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            trace!(query, "response superseded by a newer query");
            return Ok(None);
        }
        Ok(Some(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Echoes the query back as a single candidate, with a configurable
    /// response delay.
    struct EchoSearch {
        delay: Duration,
    }

    #[async_trait]
    impl PlaceSearch for EchoSearch {
        async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchError> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![PlaceCandidate {
                external_id: "1".to_string(),
                name: query.to_string(),
                address: query.to_string(),
                lat: 0.0,
                lng: 0.0,
            }])
        }
    }

    fn debounced(quiet_ms: u64, response_ms: u64) -> DebouncedSearch {
        DebouncedSearch::new(
            Arc::new(EchoSearch {
                delay: Duration::from_millis(response_ms),
            }),
            Duration::from_millis(quiet_ms),
            2,
        )
    }

    #[tokio::test]
    async fn latest_submission_wins() {
        let search = debounced(20, 0);

        let first = search.submit("first query");
        let second = search.submit("second query");
        // Second submission starts after the first, superseding it
        let (first, second) = tokio::join!(first, second);

        assert!(first.unwrap().is_none());
        let hits = second.unwrap().expect("latest submission must resolve");
        assert_eq!(hits[0].name, "second query");
    }

    #[tokio::test]
    async fn slow_response_to_superseded_query_is_discarded() {
        let search = debounced(0, 50);

        let slow = search.submit("stale");
        let fast = tokio::spawn({
            let search = search.clone();
            async move {
                // Arrives while the stale response is still in flight
                tokio::time::sleep(Duration::from_millis(10)).await;
                search.submit("fresh").await
            }
        });

        let (slow, fast) = tokio::join!(slow, fast);
        assert!(slow.unwrap().is_none());
        let hits = fast.unwrap().unwrap().expect("fresh query must resolve");
        assert_eq!(hits[0].name, "fresh");
    }

    #[tokio::test]
    async fn short_queries_clear_without_hitting_the_endpoint() {
        let search = debounced(1000, 1000); // would time out if issued
        let hits = search.submit("a").await.unwrap();
        assert_eq!(hits, Some(Vec::new()));
    }
}
