//! Debounced people picker core.
//!
//! A people picker turns keystrokes into directory lookups and lets the user
//! commit suggestions as tokens. This crate holds the interaction logic that
//! keeps three event streams consistent:
//! - query text changes (debounced, user input only)
//! - directory responses (asynchronous, possibly out of order)
//! - token add/remove events (applied immediately, in order)
//!
//! # Architecture
//!
//! - **Debounce**: [`Debouncer`] coalesces bursts into one deferred action
//! - **State**: [`PickerState`] owns both lists and the sequence guard; no I/O
//! - **Directory**: [`PeopleDirectory`] abstracts the lookup service
//! - **Picker**: [`Picker`] runs the state on one task; [`PickerHandle`] feeds it
//!
//! # Example
//!
//! ```no_run
//! use rollcall_picker::{spawn_picker, InMemoryDirectory, PickerConfig, TextChangeReason};
//! use rollcall_types::Person;
//! use std::sync::Arc;
//!
//! # async fn demo() -> rollcall_picker::PickerResult<()> {
//! let directory = InMemoryDirectory::new(vec![Person::new("1", "Jo Brown")]);
//! let (picker, _task) = spawn_picker(PickerConfig::default(), Some(Arc::new(directory)));
//!
//! picker.query_text_changed("jo", TextChangeReason::UserInput).await?;
//! let mut updates = picker.subscribe();
//! updates.changed().await.ok();
//! println!("{:?}", picker.suggested_people());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod debounce;
pub mod directory;
mod error;
pub mod event;
mod picker;
pub mod state;

pub use config::{PickerConfig, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
pub use debounce::Debouncer;
pub use directory::{InMemoryDirectory, PeopleDirectory};
pub use error::{PickerError, PickerResult};
pub use event::{PickerEvent, PickerSnapshot, TextChangeReason};
pub use picker::{spawn_picker, Picker, PickerCommand, PickerHandle};
pub use state::{PickerState, SearchOutcome, SearchRequest, SearchSeq};
