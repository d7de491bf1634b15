//! Picker driver: owns a [`PickerState`] on a single task and performs I/O.
//!
//! All state mutation happens inside [`Picker::run`]. Token-control events
//! arrive through a [`PickerHandle`]; directory lookups run as futures polled
//! by the same loop, so their continuations never race with event handling.
//! Observers read the lists through a `watch` channel of [`PickerSnapshot`]s.

use crate::config::PickerConfig;
use crate::directory::PeopleDirectory;
use crate::error::{PickerError, PickerResult};
use crate::event::{PickerEvent, PickerSnapshot, TextChangeReason};
use crate::state::{PickerState, SearchOutcome, SearchRequest, SearchSeq};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use rollcall_types::{Person, TokenItem};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Commands accepted by the picker task.
pub enum PickerCommand {
    /// An event from the token control.
    Event(PickerEvent),
    /// Host overwrote the selection list.
    SetPickedPeople(Vec<Person>),
    /// Attach, replace or detach the directory.
    SetDirectory(Option<Arc<dyn PeopleDirectory>>),
    /// Stop the task. Pending and in-flight searches are dropped.
    Shutdown,
}

impl std::fmt::Debug for PickerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerCommand::Event(e) => f.debug_tuple("Event").field(e).finish(),
            PickerCommand::SetPickedPeople(p) => {
                f.debug_tuple("SetPickedPeople").field(&p.len()).finish()
            }
            PickerCommand::SetDirectory(d) => {
                f.debug_tuple("SetDirectory").field(&d.is_some()).finish()
            }
            PickerCommand::Shutdown => f.write_str("Shutdown"),
        }
    }
}

struct Completion {
    seq: SearchSeq,
    query: String,
    result: PickerResult<Vec<Person>>,
}

/// The picker task. Create with [`Picker::new`], then drive with [`Picker::run`].
pub struct Picker {
    state: PickerState,
    directory: Option<Arc<dyn PeopleDirectory>>,
    page_size: usize,
    commands: mpsc::Receiver<PickerCommand>,
    snapshots: watch::Sender<PickerSnapshot>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl Picker {
    /// Creates a picker and the handle used to talk to it.
    pub fn new(
        config: PickerConfig,
        directory: Option<Arc<dyn PeopleDirectory>>,
    ) -> (Self, PickerHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(PickerSnapshot::default());

        let picker = Self {
            state: PickerState::new(config.debounce()),
            directory,
            page_size: config.page_size.max(1),
            commands: command_rx,
            snapshots: snapshot_tx,
            in_flight: FuturesUnordered::new(),
        };
        let handle = PickerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (picker, handle)
    }

    /// Runs until shut down or until every handle is dropped.
    pub async fn run(mut self) {
        debug!(
            "Picker started (debounce {:?})",
            self.state.debounce_window()
        );

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(PickerCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                query = self.state.next_due_query() => self.run_search_action(query),
                Some(done) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.apply_completion(done);
                }
            }
            self.publish();
        }

        let dropped = self.in_flight.len();
        if dropped > 0 || self.state.is_pending() {
            debug!(
                "Picker stopped with {} search(es) in flight, pending: {}",
                dropped,
                self.state.is_pending()
            );
        }
        info!("Picker stopped");
    }

    fn handle_command(&mut self, command: PickerCommand) {
        match command {
            PickerCommand::Event(event) => self.state.handle_event(event),
            PickerCommand::SetPickedPeople(people) => self.state.set_picked_people(people),
            PickerCommand::SetDirectory(directory) => {
                debug!("Directory {}", if directory.is_some() { "attached" } else { "detached" });
                self.directory = directory;
            }
            PickerCommand::Shutdown => {}
        }
    }

    fn run_search_action(&mut self, query: String) {
        let Some(directory) = self.directory.clone() else {
            if query.trim().is_empty() {
                // Blank queries need no lookup.
                self.state.on_debounce_elapsed(query);
            } else {
                debug!("Skipping search for {:?}: {}", query, PickerError::DirectoryUnavailable);
                self.state.supersede();
            }
            return;
        };

        if let Some(SearchRequest { seq, query }) = self.state.on_debounce_elapsed(query) {
            let page_size = self.page_size;
            self.in_flight.push(Box::pin(async move {
                let result = directory.find_people(&query).await.map(|mut people| {
                    people.truncate(page_size);
                    people
                });
                Completion { seq, query, result }
            }));
        }
    }

    fn apply_completion(&mut self, done: Completion) {
        let outcome = self
            .state
            .on_search_completed(done.seq, &done.query, done.result);
        if outcome == SearchOutcome::Stale {
            return;
        }
        // Once the latest search landed, older ones can only be stale.
        if !self.state.is_searching() && !self.in_flight.is_empty() {
            debug!("Dropping {} superseded search(es)", self.in_flight.len());
            self.in_flight.clear();
        }
    }

    fn publish(&mut self) {
        if self.state.take_changed() {
            self.snapshots.send_replace(self.state.snapshot());
        }
    }
}

/// Cloneable handle to a running [`Picker`].
///
/// This is the surface a token control binds to: it forwards the control's
/// events and exposes the two lists for rendering.
#[derive(Debug, Clone)]
pub struct PickerHandle {
    commands: mpsc::Sender<PickerCommand>,
    snapshots: watch::Receiver<PickerSnapshot>,
}

impl PickerHandle {
    /// Forwards a raw command.
    pub async fn send(&self, command: PickerCommand) -> PickerResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PickerError::Closed)
    }

    /// Forwards a token-control event.
    pub async fn event(&self, event: PickerEvent) -> PickerResult<()> {
        self.send(PickerCommand::Event(event)).await
    }

    /// The query text changed.
    pub async fn query_text_changed(
        &self,
        text: impl Into<String>,
        reason: TextChangeReason,
    ) -> PickerResult<()> {
        self.event(PickerEvent::QueryTextChanged {
            text: text.into(),
            reason,
        })
        .await
    }

    /// The user committed a token.
    pub async fn token_item_added(&self, item: impl Into<TokenItem>) -> PickerResult<()> {
        self.event(PickerEvent::TokenItemAdded(item.into())).await
    }

    /// The user deleted a token.
    pub async fn token_item_removed(&self, item: impl Into<TokenItem>) -> PickerResult<()> {
        self.event(PickerEvent::TokenItemRemoved(item.into())).await
    }

    /// Overwrites the selection list.
    pub async fn set_picked_people(&self, people: Vec<Person>) -> PickerResult<()> {
        self.send(PickerCommand::SetPickedPeople(people)).await
    }

    /// Attaches, replaces or (with `None`) detaches the directory.
    pub async fn set_directory(
        &self,
        directory: Option<Arc<dyn PeopleDirectory>>,
    ) -> PickerResult<()> {
        self.send(PickerCommand::SetDirectory(directory)).await
    }

    /// Stops the picker. Pending and in-flight searches never apply.
    pub async fn shutdown(&self) -> PickerResult<()> {
        self.send(PickerCommand::Shutdown).await
    }

    /// Latest published state.
    pub fn snapshot(&self) -> PickerSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn suggested_people(&self) -> Vec<Person> {
        self.snapshots.borrow().suggested_people.clone()
    }

    pub fn picked_people(&self) -> Vec<Person> {
        self.snapshots.borrow().picked_people.clone()
    }

    /// Receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<PickerSnapshot> {
        self.snapshots.clone()
    }

    /// Whether the picker task is gone.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Spawns a picker on the current tokio runtime.
pub fn spawn_picker(
    config: PickerConfig,
    directory: Option<Arc<dyn PeopleDirectory>>,
) -> (PickerHandle, JoinHandle<()>) {
    let (picker, handle) = Picker::new(config, directory);
    let task = tokio::spawn(picker.run());
    (handle, task)
}
