// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::notify::{Notice, NoticeLog};
use crate::tags::form::{TagField, MAX_SELECTED_TAGS};
use crate::tags::store::TagStore;
use crate::tags::{normalize_tag_name, same_entity, same_name, Tag};

/// At most this many suggestion rows are handed to the rendering layer,
/// however long the filtered list is.
pub const MAX_VISIBLE_SUGGESTIONS: usize = 5;

/// Keys the tag input reacts to. Plain text edits arrive through
/// [`TagSelectionController::on_input_change`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    ArrowUp,
    ArrowDown,
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No state change; the event keeps its default behavior.
    Ignored,
    CursorMoved,
    /// The key was handled here; the caller must suppress the default
    /// form-submit behavior.
    Consumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Failed,
    UnknownTag,
    Busy,
}

/// Confirmation step taken before a tag is deleted from the store. The
/// rendering layer decides how to ask; the controller only sees the boolean
/// outcome.
pub trait DeletePrompt {
    fn confirm_delete(&self, tag: &Tag) -> bool;
}

impl<F: Fn(&Tag) -> bool> DeletePrompt for F {
    fn confirm_delete(&self, tag: &Tag) -> bool {
        self(tag)
    }
}

/// Stateful core of the tag entry widget on the post-authoring form.
///
/// Owns the available tag pool (a client-local cache seeded from the bulk
/// fetch), the free-text input with its derived suggestion list, the
/// keyboard cursor, and the notice log. The selected tags live behind the
/// injected [`TagField`]; remote effects go through the injected
/// [`TagStore`]. Everything here is synchronous except the two store calls.
pub struct TagSelectionController<S, F> {
    store: S,
    field: F,
    pool: Vec<Tag>,
    input: String,
    filtered: Vec<Tag>,
    /// Trimmed raw text offered for creation when nothing in the pool
    /// matches. `None` while a matching suggestion exists or a create is in
    /// flight.
    pending_create: Option<String>,
    cursor: Option<usize>,
    in_flight: bool,
    notices: NoticeLog,
}

impl<S: TagStore, F: TagField> TagSelectionController<S, F> {
    pub fn new(store: S, field: F, initial_pool: Vec<Tag>) -> Self {
        let mut controller = Self {
            store,
            field,
            pool: initial_pool,
            input: String::new(),
            filtered: Vec::new(),
            pending_create: None,
            cursor: None,
            in_flight: false,
            notices: NoticeLog::new(),
        };
        controller.refresh_suggestions();
        controller
    }

    pub fn on_input_change(&mut self, text: &str) {
        self.input = text.to_string();
        self.refresh_suggestions();
    }

    pub async fn on_key_down(&mut self, key: KeyInput) -> KeyOutcome {
        match key {
            KeyInput::ArrowDown => {
                if self.filtered.is_empty() {
                    return KeyOutcome::Ignored;
                }
                let last = self.filtered.len() - 1;
                self.cursor = Some(match self.cursor {
                    None => 0,
                    Some(index) => (index + 1).min(last),
                });
                KeyOutcome::CursorMoved
            }
            KeyInput::ArrowUp => {
                if self.filtered.is_empty() {
                    return KeyOutcome::Ignored;
                }
                self.cursor = Some(match self.cursor {
                    None => self.filtered.len() - 1,
                    Some(index) => index.saturating_sub(1),
                });
                KeyOutcome::CursorMoved
            }
            KeyInput::Enter => {
                if self.input.trim().is_empty() {
                    return KeyOutcome::Ignored;
                }
                if self.pending_create.is_some() {
                    let raw = self.input.trim().to_string();
                    self.create_and_attach_tag(&raw).await;
                    return KeyOutcome::Consumed;
                }
                if let Some(index) = self.cursor {
                    if let Some(tag) = self.filtered.get(index).cloned() {
                        self.attach_existing_tag(&tag);
                        self.cursor = None;
                        return KeyOutcome::Consumed;
                    }
                }
                KeyOutcome::Ignored
            }
            KeyInput::Other => KeyOutcome::Ignored,
        }
    }

    /// Attaches a tag from the pool to the selection. Idempotent by id, and
    /// identical whether triggered from the keyboard or from a pointer click
    /// on a suggestion row.
    pub fn attach_existing_tag(&mut self, tag: &Tag) {
        let mut selected = self.field.selected_tags();
        if selected.iter().any(|existing| same_entity(existing, tag)) {
            return;
        }
        if selected.len() >= MAX_SELECTED_TAGS {
            self.notices.warning("Max limit reached!");
            return;
        }
        selected.push(tag.clone());
        self.field.replace_tags(selected);
        self.input.clear();
        self.refresh_suggestions();
    }

    /// Creates a tag in the store and attaches it. Local checks run first
    /// and never reach the network; a second trigger while a create is in
    /// flight is dropped.
    pub async fn create_and_attach_tag(&mut self, raw_name: &str) {
        if self.in_flight {
            log::debug!("Ignoring tag create while another request is in flight");
            return;
        }
        let name = normalize_tag_name(raw_name);
        if name.is_empty() {
            return;
        }
        let selected = self.field.selected_tags();
        if selected.iter().any(|tag| same_name(&tag.name, &name)) {
            self.notices.warning("Tag already exists!");
            return;
        }
        if selected.len() >= MAX_SELECTED_TAGS {
            self.notices.warning("Max limit reached!");
            return;
        }

        // Leave the creatable state before awaiting so a duplicate Enter
        // cannot dispatch a second create.
        self.in_flight = true;
        self.pending_create = None;

        match self.store.create_tag(&name).await {
            Ok(tag) => {
                let mut selected = self.field.selected_tags();
                selected.push(tag.clone());
                self.field.replace_tags(selected);
                self.pool.push(tag);
                self.input.clear();
                self.notices.success("Tag created successfully!");
            }
            Err(err) => {
                log::warn!("Tag create failed: {}", err);
                self.notices.error("Error creating tag!");
            }
        }
        self.in_flight = false;
        self.refresh_suggestions();
    }

    /// Removes the selection entry at `index`. Out of range is a silent
    /// no-op. The underlying tag entity and the pool are untouched.
    pub fn detach_from_selection(&mut self, index: usize) {
        let mut selected = self.field.selected_tags();
        if index >= selected.len() {
            return;
        }
        selected.remove(index);
        self.field.replace_tags(selected);
        self.refresh_suggestions();
    }

    /// Deletes a tag from the store after the prompt confirms. On success
    /// the tag disappears from the pool and, if attached, from the selection
    /// as well.
    pub async fn delete_tag_everywhere(
        &mut self,
        tag_id: &str,
        prompt: &impl DeletePrompt,
    ) -> DeleteOutcome {
        if self.in_flight {
            return DeleteOutcome::Busy;
        }
        let Some(tag) = self.pool.iter().find(|tag| tag.id == tag_id).cloned() else {
            return DeleteOutcome::UnknownTag;
        };
        if !prompt.confirm_delete(&tag) {
            return DeleteOutcome::Cancelled;
        }

        self.in_flight = true;
        let outcome = match self.store.delete_tag(tag_id).await {
            Ok(()) => {
                self.pool.retain(|tag| tag.id != tag_id);
                let mut selected = self.field.selected_tags();
                let before = selected.len();
                selected.retain(|tag| tag.id != tag_id);
                if selected.len() != before {
                    self.field.replace_tags(selected);
                }
                self.notices.success("Tag deleted from database!");
                DeleteOutcome::Deleted
            }
            Err(err) => {
                log::warn!("Tag delete failed: {}", err);
                self.notices.error("Error deleting tag!");
                DeleteOutcome::Failed
            }
        };
        self.in_flight = false;
        self.refresh_suggestions();
        outcome
    }

    // Observable state for the rendering layer.

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Tag] {
        &self.filtered
    }

    pub fn visible_suggestions(&self) -> &[Tag] {
        let end = self.filtered.len().min(MAX_VISIBLE_SUGGESTIONS);
        &self.filtered[..end]
    }

    pub fn create_affordance_label(&self) -> Option<String> {
        self.pending_create
            .as_ref()
            .map(|text| format!("Create \"{}\"", text))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected_tags(&self) -> Vec<Tag> {
        self.field.selected_tags()
    }

    pub fn available_tags(&self) -> &[Tag] {
        &self.pool
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    /// Recomputes the filtered suggestion list and the create affordance
    /// from the current input. Always invalidates the cursor.
    fn refresh_suggestions(&mut self) {
        let needle = self.input.to_lowercase();
        let selected = self.field.selected_tags();
        self.filtered = self
            .pool
            .iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .filter(|tag| !selected.iter().any(|chosen| same_entity(chosen, tag)))
            .cloned()
            .collect();

        let trimmed = self.input.trim();
        self.pending_create = if self.filtered.is_empty() && !trimmed.is_empty() && !self.in_flight
        {
            Some(trimmed.to_string())
        } else {
            None
        };
        self.cursor = None;
    }
}
