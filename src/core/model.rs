// VcfSheet - core/model.rs
//
// Domain types: the flattened contact record, the decoded vCard
// component it is built from, and the tabular projection used for
// display and export.

use crate::util::constants;
use serde::{Deserialize, Serialize};

/// One contact as shown in the table and written to exports.
///
/// Built once per decoded card and never mutated afterwards; filtering
/// selects subsets, exporting reshapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Formatted name (`FN`), empty when the card has none.
    pub name: String,

    /// Every `TEL` value in source order.
    pub phone_numbers: Vec<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            phone_numbers,
        }
    }

    /// Flatten a decoded card into a contact.
    pub fn from_card(card: &Card) -> Self {
        let name = card
            .first(constants::FORMATTED_NAME_PROPERTY)
            .map(|p| p.value.clone())
            .unwrap_or_default();
        let phone_numbers = card
            .all(constants::PHONE_PROPERTY)
            .map(|p| p.value.clone())
            .collect();
        Self {
            name,
            phone_numbers,
        }
    }
}

/// A single property parameter, e.g. `TYPE=CELL,VOICE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Upper-cased parameter name.
    pub name: String,
    /// Values with surrounding quotes removed.
    pub values: Vec<String>,
}

/// One decoded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Optional group prefix (`item1` in `item1.TEL:...`).
    pub group: Option<String>,
    /// Upper-cased property name.
    pub name: String,
    pub params: Vec<Param>,
    /// Unescaped (and, where declared, quoted-printable decoded) value.
    pub value: String,
}

impl Property {
    /// First value of the named parameter, compared case-insensitively.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(|p| p.values.first())
            .map(String::as_str)
    }
}

/// One `BEGIN:VCARD` .. `END:VCARD` component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub properties: Vec<Property>,
}

impl Card {
    /// First property with the given name (case-insensitive).
    pub fn first(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// All properties with the given name, in source order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Rectangular projection of a contact set: a header row plus one row per
/// contact, every row padded to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ContactTable {
    /// Number of columns, including the Name column.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of phone columns.
    pub fn phone_columns(&self) -> usize {
        self.header.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
