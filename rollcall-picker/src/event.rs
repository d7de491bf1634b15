//! Events emitted by the token control and the snapshot read model it binds to.

use rollcall_types::{Person, TokenItem};
use serde::{Deserialize, Serialize};

/// Why the query text changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextChangeReason {
    /// The user typed or deleted characters.
    UserInput,
    /// The host set the text in code (e.g. cleared it after a pick).
    ProgrammaticChange,
    /// The text was filled in from a chosen suggestion.
    SuggestionChosen,
}

impl TextChangeReason {
    /// Only user input drives searches.
    pub fn is_user_input(self) -> bool {
        matches!(self, TextChangeReason::UserInput)
    }
}

/// An event raised by the token control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The query text changed.
    QueryTextChanged {
        text: String,
        reason: TextChangeReason,
    },
    /// The user committed a token.
    TokenItemAdded(TokenItem),
    /// The user deleted a token.
    TokenItemRemoved(TokenItem),
}

/// Point-in-time copy of the picker's observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerSnapshot {
    /// Suggestions for the most recent applied search.
    pub suggested_people: Vec<Person>,
    /// Committed selections, in commit order.
    pub picked_people: Vec<Person>,
    /// Last query whose search completed.
    pub previous_query: Option<String>,
    /// Whether a directory call for the current query is in flight.
    pub searching: bool,
}
