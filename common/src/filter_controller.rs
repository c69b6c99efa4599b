//! Single-writer controller that keeps a [`FilterState`] and the URL query
//! string in sync.
//!
//! The URL is the source of truth. The controller holds a parsed copy for
//! synchronous reads, funnels every write through [`QueryLocation::replace_query`]
//! and re-derives its state from navigations it did not issue itself.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::filter_patch::FilterPatch;
use crate::filter_schema::{canonicalize_query, parse_query_string, serialize_state_to_query_string};
use crate::filter_types::FilterState;

/// The host's view of the current URL.
pub trait QueryLocation {
    /// Current query string, without the leading `?`.
    fn current_query(&self) -> String;

    /// Replaces the query of the current history entry. Must not reload the
    /// page or reset the scroll position.
    fn replace_query(&mut self, query: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPhase {
    /// State reflects the URL.
    Idle,
    /// A write was issued and its read-back has not arrived yet.
    Committing,
}

pub type FilterListener = Box<dyn FnMut(&FilterState)>;

pub struct FilterController<L> {
    location: L,
    state: FilterState,
    // canonical queries written but not yet read back, oldest first
    in_flight: VecDeque<String>,
    // canonical query the URL holds once every in-flight write has landed
    target: String,
    revision: u64,
    listeners: Vec<FilterListener>,
}

impl<L: QueryLocation> FilterController<L> {
    pub fn new(location: L) -> Self {
        let query = location.current_query();
        let state = parse_query_string(&query);
        Self {
            location,
            state,
            in_flight: VecDeque::new(),
            target: canonicalize_query(&query),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn phase(&self) -> CommitPhase {
        if self.in_flight.is_empty() {
            CommitPhase::Idle
        } else {
            CommitPhase::Committing
        }
    }

    /// Bumped exactly once for every update and every external navigation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Registers a callback run once per observable state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&FilterState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Merges `patch` into the current state and writes the result to the
    /// URL. A write still in flight is superseded. Nothing is written when
    /// the URL already holds the resulting query.
    pub fn update(&mut self, patch: FilterPatch) {
        let next = self.state.clone().merged(patch);
        self.commit(next);
    }

    /// Resets every filter; the URL is left with no filter keys.
    pub fn clear_all(&mut self) {
        self.commit(FilterState::default());
    }

    /// Feeds a navigation of the host URL into the controller.
    ///
    /// Returns true when the state was re-derived from `query`, false when
    /// the navigation was the read-back of one of our own writes or did not
    /// change the filters.
    pub fn on_location_change(&mut self, query: &str) -> bool {
        let canonical = canonicalize_query(query);

        // the same query may be in flight more than once: consume the oldest
        if let Some(pos) = self.in_flight.iter().position(|q| q == &canonical) {
            self.in_flight.drain(..=pos);
            trace!(query = %canonical, remaining = self.in_flight.len(), "filter commit read back");
            return false;
        }
        if self.in_flight.is_empty() && canonical == self.target {
            return false;
        }

        debug!(query = %canonical, dropped = self.in_flight.len(), "filters re-derived from navigation");
        self.in_flight.clear();
        self.state = parse_query_string(query);
        self.target = canonical;
        self.notify();
        true
    }

    fn commit(&mut self, next: FilterState) {
        let query = serialize_state_to_query_string(&next);
        self.state = next;

        // the host would not report a replace with an identical query back
        if query == self.target {
            trace!(query = %query, "filters unchanged in URL, not writing");
            self.notify();
            return;
        }

        if let Some(previous) = self.in_flight.back() {
            debug!(previous = %previous, query = %query, "superseding filter commit");
        } else {
            debug!(query = %query, "committing filters");
        }
        self.in_flight.push_back(query.clone());
        self.target = query.clone();
        self.location.replace_query(&query);
        self.notify();
    }

    fn notify(&mut self) {
        self.revision += 1;
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

impl<L: std::fmt::Debug> std::fmt::Debug for FilterController<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterController")
            .field("location", &self.location)
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .field("target", &self.target)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// `pathname` plus `?query`, or the bare pathname when the query is empty.
pub fn href(pathname: &str, query: &str) -> String {
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{pathname}?{query}")
    }
}

/// In-memory URL for tests and non-browser hosts.
///
/// Writes are queued and only become the current query on [`tick`], the
/// way a router applies a history replace on its next turn.
///
/// [`tick`]: MemoryLocation::tick
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    pathname: String,
    query: String,
    pending: VecDeque<String>,
    replace_count: usize,
}

impl MemoryLocation {
    pub fn new(pathname: &str, query: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            query: query.strip_prefix('?').unwrap_or(query).to_string(),
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn href(&self) -> String {
        href(&self.pathname, &self.query)
    }

    pub fn replace_count(&self) -> usize {
        self.replace_count
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies the oldest queued write and returns the new query.
    pub fn tick(&mut self) -> Option<String> {
        let next = self.pending.pop_front()?;
        self.query = next.clone();
        Some(next)
    }

    /// Navigation the controller did not issue (back/forward, a link).
    pub fn navigate(&mut self, query: &str) -> String {
        self.query = query.strip_prefix('?').unwrap_or(query).to_string();
        self.query.clone()
    }
}

impl QueryLocation for MemoryLocation {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.replace_count += 1;
        self.pending.push_back(query.to_string());
    }
}

impl FilterController<MemoryLocation> {
    /// Delivers every queued write back to the controller.
    pub fn settle(&mut self) {
        while let Some(query) = self.location.tick() {
            self.on_location_change(&query);
        }
    }
}
