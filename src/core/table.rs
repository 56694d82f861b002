// VcfSheet - core/table.rs
//
// Tabular projection: contacts -> header + padded rows.
// Shared by the on-screen table and every export format. The phone column
// count is recomputed from whatever set is passed in, so it follows the
// current search rather than the set loaded from disk.

use crate::core::model::{Contact, ContactTable};
use crate::util::constants::{MIN_PHONE_COLUMNS, NAME_HEADER, PHONE_HEADER_PREFIX};

/// Number of phone columns needed for `contacts`: the largest phone count,
/// never less than one.
pub fn phone_column_count<'a, I>(contacts: I) -> usize
where
    I: IntoIterator<Item = &'a Contact>,
{
    contacts
        .into_iter()
        .map(|c| c.phone_numbers.len())
        .max()
        .unwrap_or(0)
        .max(MIN_PHONE_COLUMNS)
}

/// `["Name", "Phone1", ..., "PhoneN"]`.
pub fn header(phone_columns: usize) -> Vec<String> {
    std::iter::once(NAME_HEADER.to_string())
        .chain((1..=phone_columns).map(|i| format!("{PHONE_HEADER_PREFIX}{i}")))
        .collect()
}

/// One row: name, then each phone in position, blank-padded to `phone_columns`.
pub fn row(contact: &Contact, phone_columns: usize) -> Vec<String> {
    let mut cells = Vec::with_capacity(phone_columns + 1);
    cells.push(contact.name.clone());
    cells.extend(contact.phone_numbers.iter().take(phone_columns).cloned());
    cells.resize(phone_columns + 1, String::new());
    cells
}

impl ContactTable {
    /// Project `contacts` into a table, preserving order.
    pub fn from_contacts<'a, I>(contacts: I) -> Self
    where
        I: IntoIterator<Item = &'a Contact>,
        I::IntoIter: Clone,
    {
        let iter = contacts.into_iter();
        let phone_columns = phone_column_count(iter.clone());
        Self {
            header: header(phone_columns),
            rows: iter.map(|c| row(c, phone_columns)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Contact {
        Contact::new("Alice", vec!["123".into(), "456".into()])
    }

    fn bob() -> Contact {
        Contact::new("Bob", vec!["789".into()])
    }

    #[test]
    fn test_header_and_padding() {
        let contacts = vec![alice(), bob()];
        let table = ContactTable::from_contacts(&contacts);
        assert_eq!(table.header, vec!["Name", "Phone1", "Phone2"]);
        assert_eq!(table.rows[0], vec!["Alice", "123", "456"]);
        assert_eq!(table.rows[1], vec!["Bob", "789", ""]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.phone_columns(), 2);
    }

    #[test]
    fn test_column_count_follows_the_given_set() {
        let contacts = vec![alice(), bob()];
        let only_bob: Vec<&Contact> = contacts.iter().filter(|c| c.name == "Bob").collect();
        let table = ContactTable::from_contacts(only_bob);
        assert_eq!(table.header, vec!["Name", "Phone1"]);
        assert_eq!(table.rows, vec![vec!["Bob".to_string(), "789".to_string()]]);
    }

    #[test]
    fn test_no_phones_still_one_blank_column() {
        let contacts = vec![Contact::new("Nobody", vec![])];
        let table = ContactTable::from_contacts(&contacts);
        assert_eq!(table.header, vec!["Name", "Phone1"]);
        assert_eq!(table.rows, vec![vec!["Nobody".to_string(), String::new()]]);
    }

    #[test]
    fn test_empty_set_has_header_only() {
        let table = ContactTable::from_contacts(&Vec::<Contact>::new());
        assert_eq!(table.header, vec!["Name", "Phone1"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_row_truncates_to_given_width() {
        assert_eq!(row(&alice(), 1), vec!["Alice", "123"]);
    }
}
