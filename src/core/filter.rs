// VcfSheet - core/filter.rs
//
// Name search over the loaded contact set.
// Core layer: pure logic, no I/O or UI dependencies.
//
// Every call re-derives the result from the full set it is given; there is
// no incremental state, so shortening a query always widens the result.

use crate::core::model::Contact;

/// Normalised form of a user query: trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// True when the query matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring test against the contact name.
    pub fn matches(&self, contact: &Contact) -> bool {
        self.is_empty() || contact.name.to_lowercase().contains(&self.needle)
    }
}

/// Indices (into `contacts`) of the contacts whose name matches `query`.
///
/// The table view keeps indices rather than copies so rows always refer
/// back to the loaded set.
pub fn matching_indices(contacts: &[Contact], query: &str) -> Vec<usize> {
    let query = NameQuery::new(query);
    if query.is_empty() {
        return (0..contacts.len()).collect();
    }
    contacts
        .iter()
        .enumerate()
        .filter(|(_, c)| query.matches(c))
        .map(|(idx, _)| idx)
        .collect()
}

/// The contacts whose name contains `query` (trimmed, case-insensitive),
/// in their original order. An empty query returns every contact.
pub fn filter(contacts: &[Contact], query: &str) -> Vec<Contact> {
    matching_indices(contacts, query)
        .into_iter()
        .filter_map(|i| contacts.get(i).cloned())
        .collect()
}
