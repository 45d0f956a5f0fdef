// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A user-visible, non-blocking notification. Notices never abort the
/// operation that produced them; the rendering layer drains and displays
/// them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "success: {}", self.message),
            NoticeLevel::Warning => write!(f, "warning: {}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        self.entries.push(Notice { level, message });
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    /// Hands the accumulated notices to the caller and resets the log.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.entries)
    }
}
