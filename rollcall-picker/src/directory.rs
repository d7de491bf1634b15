//! Directory collaborator abstraction.
//!
//! The picker only needs "query in, first page of people out". Real
//! directory clients live outside this crate and implement
//! [`PeopleDirectory`]; [`InMemoryDirectory`] covers hosts with a fixed
//! list of people and no directory connection.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::PickerResult;
use async_trait::async_trait;
use rollcall_types::Person;

/// Resolves a text query to candidate people.
#[async_trait]
pub trait PeopleDirectory: Send + Sync {
    /// Returns the first page of people matching `query`, in relevance order.
    async fn find_people(&self, query: &str) -> PickerResult<Vec<Person>>;
}

/// Directory backed by a local list, filtered with [`Person::matches`].
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    people: Vec<Person>,
    page_size: usize,
}

impl InMemoryDirectory {
    /// Creates a directory over `people` with the default page size.
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            people,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the maximum number of results per lookup.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Parses a JSON array of people.
    pub fn from_json(json: &str) -> PickerResult<Self> {
        Ok(Self::new(Person::list_from_json(json)?))
    }

    /// Number of people in the directory.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

#[async_trait]
impl PeopleDirectory for InMemoryDirectory {
    async fn find_people(&self, query: &str) -> PickerResult<Vec<Person>> {
        Ok(self
            .people
            .iter()
            .filter(|p| p.matches(query))
            .take(self.page_size)
            .cloned()
            .collect())
    }
}

/// A scripted directory for testing.
pub mod mock {
    use super::*;
    use crate::error::PickerError;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    enum Reply {
        People(Vec<Person>),
        Fail(String),
    }

    #[derive(Debug, Default)]
    struct Script {
        replies: HashMap<String, Reply>,
        latencies: HashMap<String, Duration>,
        calls: Vec<String>,
    }

    /// Directory with canned replies per query. Records every call.
    ///
    /// Unscripted queries resolve to an empty page. Clones share the script
    /// and the call log.
    #[derive(Debug, Clone, Default)]
    pub struct ScriptedDirectory {
        script: Arc<Mutex<Script>>,
    }

    impl ScriptedDirectory {
        /// Creates an empty script.
        pub fn new() -> Self {
            Self::default()
        }

        /// Replies to `query` with `people`.
        pub fn respond(&self, query: impl Into<String>, people: Vec<Person>) -> &Self {
            self.script
                .lock()
                .unwrap()
                .replies
                .insert(query.into(), Reply::People(people));
            self
        }

        /// Fails lookups for `query` with a directory error.
        pub fn fail(&self, query: impl Into<String>, message: impl Into<String>) -> &Self {
            self.script
                .lock()
                .unwrap()
                .replies
                .insert(query.into(), Reply::Fail(message.into()));
            self
        }

        /// Delays the reply for `query`.
        pub fn delay(&self, query: impl Into<String>, latency: Duration) -> &Self {
            self.script
                .lock()
                .unwrap()
                .latencies
                .insert(query.into(), latency);
            self
        }

        /// Queries received so far, in call order.
        pub fn calls(&self) -> Vec<String> {
            self.script.lock().unwrap().calls.clone()
        }

        /// Number of lookups received so far.
        pub fn call_count(&self) -> usize {
            self.script.lock().unwrap().calls.len()
        }
    }

    #[async_trait]
    impl PeopleDirectory for ScriptedDirectory {
        async fn find_people(&self, query: &str) -> PickerResult<Vec<Person>> {
            let (reply, latency) = {
                let mut script = self.script.lock().unwrap();
                script.calls.push(query.to_string());
                (
                    script.replies.get(query).cloned(),
                    script.latencies.get(query).copied(),
                )
            };

            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            match reply {
                Some(Reply::People(people)) => Ok(people),
                Some(Reply::Fail(message)) => Err(PickerError::Directory(message)),
                None => Ok(Vec::new()),
            }
        }
    }
}
