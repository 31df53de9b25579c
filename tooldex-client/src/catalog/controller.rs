//! Search/filter/pagination controller
//!
//! Client-side state machine behind the tool grid. Filter changes are
//! debounced: a refetch is scheduled after a quiet period and every new
//! change cancels the pending one, so only the latest filter state ever
//! reaches the backend. "Load more" appends to the current list using the
//! backend cursor; the tag vocabulary is recomputed only on
//! filter-triggered fetches.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use shared::ToolPage;
use shared::catalog::ToolQuery;
use shared::models::{CategoryFilter, FilterState, PageCursor, SortSpec, Tag, Tool, dedup_tags};

use super::fetcher::CatalogSource;

/// Quiet period before a filter change triggers a refetch
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Fixed user-facing message for any fetch failure
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch tools. Please try again.";

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Filter-triggered fetch in flight (list will be replaced)
    Fetching,
    /// Load-more fetch in flight (list will be appended)
    FetchingMore,
    Error,
}

/// Snapshot of everything the grid renders
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub filters: FilterState,
    pub tools: Vec<Tool>,
    /// Tags observed in the current result set, unique by slug, sorted by
    /// name. Recomputed only by filter-triggered fetches.
    pub tag_vocabulary: Vec<Tag>,
    pub cursor: PageCursor,
    pub phase: Phase,
    pub error: Option<String>,
}

/// Debounced list-state controller over a [`CatalogSource`]
pub struct CatalogController<S: CatalogSource + 'static> {
    source: Arc<S>,
    state: Arc<Mutex<CatalogState>>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<S: CatalogSource + 'static> CatalogController<S> {
    /// Seed from a page the caller already fetched. Seeding never triggers
    /// a refetch.
    pub fn new(source: Arc<S>, seed: ToolPage) -> Self {
        Self::with_debounce(source, seed, DEBOUNCE)
    }

    pub fn with_debounce(source: Arc<S>, seed: ToolPage, debounce: Duration) -> Self {
        let tag_vocabulary = tag_vocabulary(&seed.tools);
        Self {
            source,
            state: Arc::new(Mutex::new(CatalogState {
                filters: FilterState::default(),
                tools: seed.tools,
                tag_vocabulary,
                cursor: seed.page,
                phase: Phase::Idle,
                error: None,
            })),
            debounce,
            pending: None,
        }
    }

    /// Seed from the caller's initial fetch result: a failed initial load
    /// starts with an empty list in the error state.
    pub fn from_result(
        source: Arc<S>,
        initial: Result<ToolPage, crate::ClientError>,
    ) -> Self {
        match initial {
            Ok(page) => Self::new(source, page),
            Err(err) => {
                tracing::warn!(error = %err, "Initial catalog load failed");
                let mut controller = Self::new(source, ToolPage::default());
                {
                    let mut state = controller.state.lock().expect("state lock");
                    state.phase = Phase::Error;
                    state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                }
                controller
            }
        }
    }

    /// Current state, cloned
    pub fn snapshot(&self) -> CatalogState {
        self.state.lock().expect("state lock").clone()
    }

    // ==================== Filter mutations ====================

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.mutate_filters(|f| f.search_term = term);
    }

    /// `"all"` clears the category constraint
    pub fn set_category(&mut self, value: impl Into<String>) {
        let category = CategoryFilter::from_value(value);
        self.mutate_filters(|f| f.category = category);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.mutate_filters(|f| f.sort = sort);
    }

    /// Select the tag if absent, deselect it if present
    pub fn toggle_tag(&mut self, tag: &Tag) {
        let tag = tag.clone();
        self.mutate_filters(move |f| {
            if let Some(pos) = f.tags.iter().position(|t| t.slug == tag.slug) {
                f.tags.remove(pos);
            } else {
                f.tags.push(tag);
            }
        });
    }

    pub fn clear_filters(&mut self) {
        self.mutate_filters(|f| *f = FilterState::default());
    }

    fn mutate_filters(&mut self, apply: impl FnOnce(&mut FilterState)) {
        {
            let mut state = self.state.lock().expect("state lock");
            apply(&mut state.filters);
            // A cursor is only valid with the filter state that produced
            // it: drop it immediately, not just when the refetch lands.
            state.cursor = PageCursor::default();
        }
        self.schedule_refetch();
    }

    /// Single-flight debounce: a new schedule cancels the pending one, so
    /// intermediate filter states are never fetched.
    fn schedule_refetch(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let source = self.source.clone();
        let state = self.state.clone();
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            refetch(source, state).await;
        }));
    }

    // ==================== Pagination ====================

    /// Fetch the next page and append it. Available only while the backend
    /// reports another page and no fetch is in flight; returns whether a
    /// fetch was performed and succeeded.
    pub async fn load_more(&self) -> bool {
        let query = {
            let mut state = self.state.lock().expect("state lock");
            if matches!(state.phase, Phase::Fetching | Phase::FetchingMore) {
                return false;
            }
            if !state.cursor.has_next_page {
                return false;
            }
            let Some(cursor) = state.cursor.end_cursor.clone() else {
                return false;
            };
            state.phase = Phase::FetchingMore;
            state.error = None;
            ToolQuery::from_filters(&state.filters).with_after(cursor)
        };

        match self.source.fetch_page(&query).await {
            Ok(page) => {
                let mut state = self.state.lock().expect("state lock");
                // Append in received order; the tag vocabulary stays as
                // computed by the last filter-triggered fetch.
                state.tools.extend(page.tools);
                state.cursor = page.page;
                state.phase = Phase::Idle;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Load-more fetch failed");
                let mut state = self.state.lock().expect("state lock");
                state.phase = Phase::Error;
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                false
            }
        }
    }
}

/// Filter-triggered refetch: replaces the list and recomputes the tag
/// vocabulary. On failure the previous items are preserved.
async fn refetch<S: CatalogSource>(source: Arc<S>, state: Arc<Mutex<CatalogState>>) {
    let query = {
        let mut guard = state.lock().expect("state lock");
        guard.phase = Phase::Fetching;
        guard.error = None;
        ToolQuery::from_filters(&guard.filters)
    };

    match source.fetch_page(&query).await {
        Ok(page) => {
            let mut guard = state.lock().expect("state lock");
            guard.tag_vocabulary = tag_vocabulary(&page.tools);
            guard.tools = page.tools;
            guard.cursor = page.page;
            guard.phase = Phase::Idle;
        }
        Err(err) => {
            tracing::warn!(error = %err, "Tool listing refetch failed");
            let mut guard = state.lock().expect("state lock");
            guard.phase = Phase::Error;
            guard.error = Some(FETCH_ERROR_MESSAGE.to_string());
        }
    }
}

/// Tags observed in a result set: unique by slug, sorted by display name
pub fn tag_vocabulary(tools: &[Tool]) -> Vec<Tag> {
    dedup_tags(tools.iter().flat_map(|t| t.tags.iter().cloned()))
}
