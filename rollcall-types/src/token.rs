//! Token payloads.

use crate::Person;
use serde::{Deserialize, Serialize};

/// Content of a token committed or deleted in the token control.
///
/// Token controls can also tokenize raw text the user typed; those tokens are
/// not directory entries and the picker ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenItem {
    /// A directory person.
    Person(Person),
    /// Free text.
    Text(String),
}

impl TokenItem {
    /// Returns the person payload, if any.
    pub fn as_person(&self) -> Option<&Person> {
        match self {
            TokenItem::Person(person) => Some(person),
            TokenItem::Text(_) => None,
        }
    }

    /// Consumes the token, returning the person payload if any.
    pub fn into_person(self) -> Option<Person> {
        match self {
            TokenItem::Person(person) => Some(person),
            TokenItem::Text(_) => None,
        }
    }
}

impl From<Person> for TokenItem {
    fn from(person: Person) -> Self {
        TokenItem::Person(person)
    }
}
