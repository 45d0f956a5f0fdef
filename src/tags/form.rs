// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::tags::Tag;
use std::collections::HashSet;
use std::fmt;

pub const MAX_SELECTED_TAGS: usize = 5;

/// Read/replace access to the `tags` field of the enclosing post form. The
/// controller never reaches into the form directly; it goes through this
/// seam.
pub trait TagField {
    fn selected_tags(&self) -> Vec<Tag>;
    fn replace_tags(&mut self, tags: Vec<Tag>);
}

/// In-memory backing for the post form's `tags` field. When editing an
/// existing post the field starts from that post's tags.
#[derive(Debug, Default)]
pub struct PostTagsField {
    tags: Vec<Tag>,
}

impl PostTagsField {
    pub fn new(initial: Vec<Tag>) -> Self {
        let mut seen = HashSet::new();
        let mut tags: Vec<Tag> = initial
            .into_iter()
            .filter(|tag| seen.insert(tag.id.clone()))
            .collect();
        tags.truncate(MAX_SELECTED_TAGS);
        Self { tags }
    }
}

impl TagField for PostTagsField {
    fn selected_tags(&self) -> Vec<Tag> {
        self.tags.clone()
    }

    fn replace_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TagFieldError {
    Empty,
    OverLimit(usize),
    DuplicateId(String),
}

impl fmt::Display for TagFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFieldError::Empty => write!(f, "Tag field cannot be empty"),
            TagFieldError::OverLimit(count) => write!(
                f,
                "You can add up to {} tags only, got {}",
                MAX_SELECTED_TAGS, count
            ),
            TagFieldError::DuplicateId(id) => {
                write!(f, "Tag {} appears more than once", id)
            }
        }
    }
}

impl std::error::Error for TagFieldError {}

/// Authoritative gate applied when the post form is submitted. The
/// controller's own pre-checks exist only to give earlier feedback; this is
/// what actually blocks submission.
pub fn validate_for_submit(tags: &[Tag]) -> Result<(), TagFieldError> {
    if tags.is_empty() {
        return Err(TagFieldError::Empty);
    }
    if tags.len() > MAX_SELECTED_TAGS {
        return Err(TagFieldError::OverLimit(tags.len()));
    }
    let mut seen = HashSet::new();
    for tag in tags {
        if !seen.insert(tag.id.as_str()) {
            return Err(TagFieldError::DuplicateId(tag.id.clone()));
        }
    }
    Ok(())
}
