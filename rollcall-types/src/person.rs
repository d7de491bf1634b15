//! Directory person records.

use crate::PersonId;
use serde::{Deserialize, Serialize};

/// A person (or contact) returned by a directory lookup.
///
/// Records are treated as immutable once produced by a directory; the picker
/// only moves them between its suggestion and selection lists. List
/// membership is decided by [`Person::id`] alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Directory identifier.
    pub id: PersonId,
    /// Name shown on suggestion rows and tokens.
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Primary email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
}

impl Person {
    /// Creates a person with only an id and a display name.
    pub fn new(id: impl Into<PersonId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            given_name: None,
            surname: None,
            email: None,
            job_title: None,
            department: None,
            office_location: None,
        }
    }

    /// Sets the given name and surname.
    #[must_use]
    pub fn with_names(mut self, given_name: impl Into<String>, surname: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self.surname = Some(surname.into());
        self
    }

    /// Sets the primary email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the job title.
    #[must_use]
    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Returns true if both records refer to the same directory entry.
    #[must_use]
    pub fn same_entry(&self, other: &Person) -> bool {
        self.id == other.id
    }

    /// Case-insensitive match of `query` against the searchable name fields
    /// and email. A blank query matches nothing.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        [
            Some(self.display_name.as_str()),
            self.given_name.as_deref(),
            self.surname.as_deref(),
            self.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Parses a JSON array of people, e.g. an exported directory page.
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Person>> {
        Ok(serde_json::from_str(json)?)
    }
}
