//! Page-indexed list loading with stale-result protection.
//!
//! A [`ListPager`] owns the visible state of one paginated list (items,
//! totals, loading flag, error text) and a fetch function that loads one
//! page. Concurrent loads are ordered by start sequence: whenever a newer
//! load starts, every older in-flight result is discarded wholesale, so the
//! visible list never mixes pages from different generations of the query.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::GatewayError;

/// Debounce window for text-search-driven refreshes.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(450);

/// Delay between retries while racing session initialization.
const SESSION_RETRY_DELAY: Duration = Duration::from_millis(600);
/// Retries after the initial attempt.
const SESSION_RETRY_LIMIT: u32 = 3;

/// One page worth of fetch parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_index: u64,
    pub page_size: u64,
}

/// One fetched page.
#[derive(Clone, Debug)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
    pub page_index: u64,
}

/// Snapshot of the pager's visible state.
#[derive(Clone, Debug)]
pub struct PagerState<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

struct Inner<T> {
    items: Vec<T>,
    total_count: u64,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    next_page: u64,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            has_more: true,
            loading: false,
            error: None,
            next_page: 0,
        }
    }
}

/// Pager over a page-fetch function.
///
/// `Q` is the caller's filter type, passed to the fetch function alongside
/// the page request; replacing it invalidates everything in flight.
pub struct ListPager<T, Q, F> {
    fetch: F,
    page_size: u64,
    filter: Mutex<Q>,
    seq: AtomicU64,
    debounce_gen: AtomicU64,
    state: Mutex<Inner<T>>,
}

impl<T, Q, F, Fut> ListPager<T, Q, F>
where
    T: Clone,
    Q: Clone,
    F: Fn(PageRequest, Q) -> Fut,
    Fut: Future<Output = Result<ListPage<T>, GatewayError>>,
{
    pub fn new(page_size: u64, filter: Q, fetch: F) -> Self {
        Self {
            fetch,
            page_size,
            filter: Mutex::new(filter),
            seq: AtomicU64::new(0),
            debounce_gen: AtomicU64::new(0),
            state: Mutex::new(Inner::default()),
        }
    }

    pub fn state(&self) -> PagerState<T> {
        let inner = self.state.lock();
        PagerState {
            items: inner.items.clone(),
            total_count: inner.total_count,
            has_more: inner.has_more,
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    /// Reload page zero, replacing the current items when it lands.
    pub async fn refresh(&self) {
        self.run(0, true).await;
    }

    /// Reload page zero after the debounce window, unless a newer
    /// debounced refresh arrives first.
    pub async fn refresh_debounced(&self) {
        let generation = self.debounce_gen.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(SEARCH_DEBOUNCE).await;
        if self.debounce_gen.load(Ordering::SeqCst) == generation {
            self.refresh().await;
        }
    }

    /// Load the next page and append it.
    ///
    /// No-op while a load is in flight or when the last page reported no
    /// further data.
    pub async fn load_more(&self) {
        let next_page = {
            let inner = self.state.lock();
            if inner.loading || !inner.has_more {
                return;
            }
            inner.next_page
        };
        self.run(next_page, false).await;
    }

    /// Install a new filter: everything in flight becomes stale, the list
    /// empties, and paging restarts from zero.
    pub fn set_filter(&self, filter: Q) {
        *self.filter.lock() = filter;
        self.seq.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.state.lock();
        inner.items.clear();
        inner.total_count = 0;
        inner.has_more = true;
        // In-flight loads are stale now, so nothing will clear this flag.
        inner.loading = false;
        inner.error = None;
        inner.next_page = 0;
    }

    async fn run(&self, page_index: u64, replace: bool) {
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.filter.lock().clone();
        {
            let mut inner = self.state.lock();
            inner.loading = true;
            inner.error = None;
        }

        let request = PageRequest {
            page_index,
            page_size: self.page_size,
        };
        let result = self.fetch_with_session_retry(request, filter).await;

        let mut inner = self.state.lock();
        if self.seq.load(Ordering::SeqCst) != my_seq {
            // A newer load started while this one was in flight.
            return;
        }
        inner.loading = false;
        match result {
            Ok(page) => {
                if replace {
                    inner.items = page.items;
                } else {
                    inner.items.extend(page.items);
                }
                inner.total_count = page.total_count;
                inner.has_more = page.has_more;
                inner.next_page = page.page_index + 1;
            }
            // Timeouts stay out of the visible error text; the list simply
            // keeps its previous contents.
            Err(GatewayError::Timeout(_)) => {}
            Err(err) => {
                inner.error = Some(err.to_string());
            }
        }
    }

    async fn fetch_with_session_retry(
        &self,
        request: PageRequest,
        filter: Q,
    ) -> Result<ListPage<T>, GatewayError> {
        let mut retries = 0;
        loop {
            match (self.fetch)(request, filter.clone()).await {
                Err(err) if err.is_retryable_session_race() && retries < SESSION_RETRY_LIMIT => {
                    retries += 1;
                    tracing::debug!(retries, "session not ready, retrying page fetch");
                    tokio::time::sleep(SESSION_RETRY_DELAY).await;
                }
                other => return other,
            }
        }
    }
}
