//! Bounded-concurrency metadata fetching
//!
//! IDs are split into consecutive batches of at most `concurrency` items.
//! Each batch is fetched in parallel on a dedicated rayon pool with exactly
//! `concurrency` threads, and the next batch only starts once every fetch in
//! the current one has settled. The first failed fetch aborts the run.

use log::debug;
use rayon::prelude::*;

use crate::error::CountError;
use crate::models::{ItemId, ItemMetadata};
use crate::source::MailSource;

/// Fetches item metadata in fixed-size, strictly sequential batches
pub struct BatchFetcher {
    pool: rayon::ThreadPool,
    concurrency: usize,
}

impl BatchFetcher {
    /// Create a fetcher allowing at most `concurrency` fetches in flight
    pub fn new(concurrency: usize) -> Result<Self, CountError> {
        let concurrency = concurrency.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .thread_name(|i| format!("fetch-{}", i))
            .build()
            .map_err(CountError::WorkerPool)?;
        Ok(Self { pool, concurrency })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetch metadata for `ids`, handing each completed batch to `on_batch`
    ///
    /// `on_batch` runs on the calling thread, after the batch's fetches have
    /// all finished and before the next batch is issued. Results within a
    /// batch keep the order of `ids`.
    pub fn fetch_all<S, F>(&self, source: &S, ids: &[ItemId], mut on_batch: F) -> Result<(), CountError>
    where
        S: MailSource + ?Sized,
        F: FnMut(Vec<ItemMetadata>),
    {
        for (n, batch) in ids.chunks(self.concurrency).enumerate() {
            let fetched = self
                .pool
                .install(|| {
                    batch
                        .par_iter()
                        .map(|id| source.get_item(id))
                        .collect::<anyhow::Result<Vec<_>>>()
                })
                .map_err(CountError::RemoteCall)?;

            debug!("Batch {} settled: {} items", n + 1, fetched.len());
            on_batch(fetched);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticMailSource;
    use std::time::Duration;

    fn items(n: usize) -> Vec<ItemMetadata> {
        (0..n)
            .map(|i| ItemMetadata::new(format!("m{i}"), Some(i as i64)))
            .collect()
    }

    fn ids(items: &[ItemMetadata]) -> Vec<ItemId> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_45_items_make_three_sequential_batches() {
        let all = items(45);
        let source = StaticMailSource::paged(all.clone(), 45);
        let fetcher = BatchFetcher::new(20).unwrap();

        let mut batch_sizes = Vec::new();
        let mut fetches_at_settle = Vec::new();
        let mut fetched = Vec::new();
        fetcher
            .fetch_all(&source, &ids(&all), |batch| {
                batch_sizes.push(batch.len());
                // No fetch from the next batch may have started yet
                fetches_at_settle.push(source.fetch_calls());
                fetched.extend(batch);
            })
            .unwrap();

        assert_eq!(batch_sizes, vec![20, 20, 5]);
        assert_eq!(fetches_at_settle, vec![20, 40, 45]);
        assert_eq!(fetched, all);
    }

    #[test]
    fn test_in_flight_never_exceeds_concurrency() {
        let all = items(30);
        let source =
            StaticMailSource::paged(all.clone(), 30).with_fetch_delay(Duration::from_millis(10));
        let fetcher = BatchFetcher::new(4).unwrap();

        fetcher.fetch_all(&source, &ids(&all), |_| {}).unwrap();

        assert_eq!(source.fetch_calls(), 30);
        assert!(source.peak_in_flight() <= 4);
        assert!(source.peak_in_flight() > 1);
    }

    #[test]
    fn test_failure_aborts_remaining_batches() {
        let all = items(45);
        let source = StaticMailSource::paged(all.clone(), 45).failing_on("m3");
        let fetcher = BatchFetcher::new(20).unwrap();

        let mut batches = 0;
        let err = fetcher
            .fetch_all(&source, &ids(&all), |_| batches += 1)
            .unwrap_err();

        assert!(matches!(err, CountError::RemoteCall(_)));
        assert!(err.to_string().contains("m3"));
        assert_eq!(batches, 0);
        assert!(source.fetch_calls() <= 20);
    }

    #[test]
    fn test_empty_input_makes_no_calls() {
        let source = StaticMailSource::empty();
        let fetcher = BatchFetcher::new(20).unwrap();

        let mut batches = 0;
        fetcher.fetch_all(&source, &[], |_| batches += 1).unwrap();

        assert_eq!(batches, 0);
        assert_eq!(source.fetch_calls(), 0);
    }

    #[test]
    fn test_zero_concurrency_is_raised_to_one() {
        let fetcher = BatchFetcher::new(0).unwrap();
        assert_eq!(fetcher.concurrency(), 1);
    }
}
