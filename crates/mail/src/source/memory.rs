//! In-memory mail source
//!
//! Serves a fixed set of pages and items, and records how it was called so
//! pagination and fetch concurrency can be checked without a network.

use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::MailSource;
use crate::models::{ItemId, ItemMetadata, ListingPage};

/// In-memory implementation of MailSource
///
/// Page `n` is reached through the cursor `page-n`; the first page needs no
/// cursor. An empty source answers the first listing call with an empty,
/// final page.
pub struct StaticMailSource {
    pages: Vec<Vec<ItemId>>,
    items: HashMap<ItemId, ItemMetadata>,
    failing_items: HashSet<ItemId>,
    fetch_delay: Duration,
    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    queries: Mutex<Vec<Option<String>>>,
}

impl StaticMailSource {
    /// Create a source serving the given pages of items, in order
    pub fn from_pages(pages: Vec<Vec<ItemMetadata>>) -> Self {
        let mut items = HashMap::new();
        let pages: Vec<Vec<ItemId>> = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|item| {
                        let id = item.id.clone();
                        items.insert(id.clone(), item);
                        id
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            pages,
            items,
            failing_items: HashSet::new(),
            fetch_delay: Duration::ZERO,
            list_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Create a source whose items are split into pages of `page_len`
    pub fn paged(items: Vec<ItemMetadata>, page_len: usize) -> Self {
        let pages = items
            .chunks(page_len.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        Self::from_pages(pages)
    }

    /// Create a source with no items at all
    pub fn empty() -> Self {
        Self::from_pages(Vec::new())
    }

    /// Make fetches of `id` fail
    pub fn failing_on(mut self, id: impl Into<ItemId>) -> Self {
        self.failing_items.insert(id.into());
        self
    }

    /// Hold every fetch open for `delay`, so overlapping fetches are visible
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Number of listing calls made so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of item fetches made so far
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that were ever in progress at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Search filters passed to each listing call, in call order
    pub fn queries(&self) -> Vec<Option<String>> {
        self.queries.lock().unwrap().clone()
    }

    fn page_index(cursor: Option<&str>) -> Result<usize> {
        match cursor {
            None => Ok(0),
            Some(c) => c
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| anyhow!("Invalid page token: {}", c)),
        }
    }
}

impl MailSource for StaticMailSource {
    fn list_page(
        &self,
        cursor: Option<&str>,
        _page_size: usize,
        query: Option<&str>,
    ) -> Result<ListingPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.map(str::to_string));

        let index = Self::page_index(cursor)?;
        if self.pages.is_empty() && index == 0 {
            return Ok(ListingPage::default());
        }

        let ids = self
            .pages
            .get(index)
            .ok_or_else(|| anyhow!("No page at index {}", index))?
            .clone();
        let next_cursor = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(ListingPage::new(ids, next_cursor))
    }

    fn get_item(&self, id: &ItemId) -> Result<ItemMetadata> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        if !self.fetch_delay.is_zero() {
            std::thread::sleep(self.fetch_delay);
        }

        let result = if self.failing_items.contains(id) {
            Err(anyhow!("HTTP 500 fetching message {}", id.as_str()))
        } else {
            self.items
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow!("HTTP 404 fetching message {}", id.as_str()))
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
