// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod controller;
pub mod form;
pub mod store;

pub use controller::{DeleteOutcome, DeletePrompt, KeyInput, KeyOutcome, TagSelectionController};
pub use form::{validate_for_submit, PostTagsField, TagField, TagFieldError, MAX_SELECTED_TAGS};
pub use store::{HttpTagStore, StoreError, StoreErrorKind, TagStore};

use serde::{Deserialize, Serialize};

/// A label attachable to a post. Two tags are the same entity iff their ids
/// match; names are only compared for duplicate detection, never for
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Canonical display form of a tag name: surrounding whitespace removed,
/// first character uppercased, the rest left as typed.
pub fn normalize_tag_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Duplicate detection is case-insensitive over trimmed names.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn same_entity(a: &Tag, b: &Tag) -> bool {
    a.id == b.id
}
