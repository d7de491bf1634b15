//! Picker state machine: list and search bookkeeping without I/O.
//!
//! `PickerState` owns the suggestion list, the selection list and the
//! debounce coordinator. It decides *when* a search should run and *whether*
//! its result may be applied; the driver in [`crate::picker`] performs the
//! actual directory call and feeds the outcome back.
//!
//! Phases: idle, pending (debounce armed), searching (a call for the latest
//! query is in flight). A text change always re-arms the debounce, so
//! pending and searching can overlap: the old call keeps running, but its
//! result will be dropped by the sequence guard.

use crate::debounce::Debouncer;
use crate::error::PickerResult;
use crate::event::{PickerEvent, PickerSnapshot, TextChangeReason};
use rollcall_types::{Person, TokenItem};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Monotonic number identifying a dispatched search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchSeq(u64);

impl SearchSeq {
    /// Returns the raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SearchSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directory lookup the driver must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: SearchSeq,
    pub query: String,
}

/// What happened to a search completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the suggestion list.
    Applied,
    /// The directory failed; suggestions stay empty.
    Failed,
    /// A newer search was dispatched; the completion was dropped.
    Stale,
}

/// State of one picker instance.
#[derive(Debug)]
pub struct PickerState {
    suggested: Vec<Person>,
    picked: Vec<Person>,
    previous_query: Option<String>,
    debouncer: Debouncer<String>,
    debounce_window: Duration,
    /// Latest dispatched search.
    latest_seq: u64,
    /// Sequence of the latest search still awaiting its completion.
    in_flight: Option<SearchSeq>,
    changed: bool,
}

impl PickerState {
    /// Creates an idle picker with empty lists.
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            suggested: Vec::new(),
            picked: Vec::new(),
            previous_query: None,
            debouncer: Debouncer::new(),
            debounce_window,
            latest_seq: 0,
            in_flight: None,
            changed: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn suggested_people(&self) -> &[Person] {
        &self.suggested
    }

    pub fn picked_people(&self) -> &[Person] {
        &self.picked
    }

    /// Last query whose search completed (diagnostic only).
    pub fn previous_query(&self) -> Option<&str> {
        self.previous_query.as_deref()
    }

    pub fn debounce_window(&self) -> Duration {
        self.debounce_window
    }

    /// Sequence of the most recently dispatched search, if any.
    pub fn latest_seq(&self) -> Option<SearchSeq> {
        (self.latest_seq > 0).then_some(SearchSeq(self.latest_seq))
    }

    pub fn is_idle(&self) -> bool {
        !self.is_pending() && !self.is_searching()
    }

    /// A debounce window is running.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The latest dispatched search has not completed yet.
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Copies the observable state.
    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            suggested_people: self.suggested.clone(),
            picked_people: self.picked.clone(),
            previous_query: self.previous_query.clone(),
            searching: self.is_searching(),
        }
    }

    /// Returns whether observable state changed since the last call, and
    /// resets the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    // ── Event dispatch ───────────────────────────────────────────

    /// Routes a token-control event to its handler.
    ///
    /// Text changes only arm the debounce; nothing is returned for them here.
    pub fn handle_event(&mut self, event: PickerEvent) {
        match event {
            PickerEvent::QueryTextChanged { text, reason } => {
                self.on_query_text_changed(text, reason);
            }
            PickerEvent::TokenItemAdded(item) => self.on_token_item_added(item),
            PickerEvent::TokenItemRemoved(item) => self.on_token_item_removed(&item),
        }
    }

    // ── Query text ───────────────────────────────────────────────

    /// Handles a query text change. Returns true if a search was (re)scheduled.
    pub fn on_query_text_changed(
        &mut self,
        text: impl Into<String>,
        reason: TextChangeReason,
    ) -> bool {
        if !reason.is_user_input() {
            debug!("Ignoring {:?} text change", reason);
            return false;
        }

        let text = text.into();
        let superseded = self.debouncer.schedule(text, self.debounce_window);
        if superseded {
            debug!("Debounce re-armed, previous query dropped");
        }
        true
    }

    /// Waits for the debounce window to elapse and returns the query to act on.
    ///
    /// Never resolves while no text change is pending. Cancel-safe.
    pub async fn next_due_query(&mut self) -> String {
        self.debouncer.fired().await
    }

    /// Runs the search action for `query` once its debounce window elapsed.
    ///
    /// Blank queries clear the suggestions right away and need no lookup.
    /// Otherwise suggestions are cleared and a request is returned for the
    /// driver to execute.
    pub fn on_debounce_elapsed(&mut self, query: String) -> Option<SearchRequest> {
        self.clear_suggestions();

        if query.trim().is_empty() {
            debug!("Blank query, suggestions cleared");
            // A blank query supersedes any lookup still in flight.
            self.latest_seq += 1;
            self.set_in_flight(None);
            self.previous_query = Some(query);
            self.changed = true;
            return None;
        }

        self.latest_seq += 1;
        let seq = SearchSeq(self.latest_seq);
        self.set_in_flight(Some(seq));
        debug!("Dispatching search {} for {:?}", seq, query);
        Some(SearchRequest { seq, query })
    }

    /// Invalidates any search still in flight without dispatching a new one.
    ///
    /// Used when a query falls due but no lookup can be made for it. The
    /// lists and `previous_query` are left as they are.
    pub fn supersede(&mut self) {
        self.latest_seq += 1;
        self.set_in_flight(None);
    }

    /// Applies (or drops) the completion of search `seq`.
    pub fn on_search_completed(
        &mut self,
        seq: SearchSeq,
        query: &str,
        result: PickerResult<Vec<Person>>,
    ) -> SearchOutcome {
        if seq.get() != self.latest_seq {
            debug!(
                "Discarding stale results for {:?} ({}, latest #{})",
                query, seq, self.latest_seq
            );
            return SearchOutcome::Stale;
        }

        self.set_in_flight(None);
        match result {
            Ok(people) => {
                debug!("Search {} for {:?} returned {} people", seq, query, people.len());
                self.suggested = people;
                self.previous_query = Some(query.to_string());
                self.changed = true;
                SearchOutcome::Applied
            }
            Err(e) => {
                warn!("People search for {:?} failed: {}", query, e);
                SearchOutcome::Failed
            }
        }
    }

    // ── Tokens ───────────────────────────────────────────────────

    /// Appends a committed person to the selection list.
    pub fn on_token_item_added(&mut self, item: TokenItem) {
        let Some(person) = item.into_person() else {
            debug!("Ignoring added token without a person payload");
            return;
        };

        if self.picked.iter().any(|p| p.same_entry(&person)) {
            debug!("{} already picked", person.id);
            return;
        }

        info!("Picked {} ({})", person.display_name, person.id);
        self.picked.push(person);
        self.changed = true;
    }

    /// Removes the first picked entry matching the token's person.
    pub fn on_token_item_removed(&mut self, item: &TokenItem) {
        let Some(person) = item.as_person() else {
            debug!("Ignoring removed token without a person payload");
            return;
        };

        match self.picked.iter().position(|p| p.same_entry(person)) {
            Some(index) => {
                let removed = self.picked.remove(index);
                info!("Unpicked {} ({})", removed.display_name, removed.id);
                self.changed = true;
            }
            None => debug!("{} was not picked", person.id),
        }
    }

    /// Replaces the selection list, dropping repeated entries.
    pub fn set_picked_people(&mut self, people: Vec<Person>) {
        let mut picked: Vec<Person> = Vec::with_capacity(people.len());
        for person in people {
            if !picked.iter().any(|p| p.same_entry(&person)) {
                picked.push(person);
            }
        }
        self.picked = picked;
        self.changed = true;
    }

    // ── Internals ────────────────────────────────────────────────

    fn clear_suggestions(&mut self) {
        if !self.suggested.is_empty() {
            self.suggested.clear();
            self.changed = true;
        }
    }

    fn set_in_flight(&mut self, seq: Option<SearchSeq>) {
        if self.in_flight != seq {
            self.in_flight = seq;
            self.changed = true;
        }
    }
}
