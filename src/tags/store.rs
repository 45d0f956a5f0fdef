// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::TagServiceConfig;
use crate::tags::Tag;
use awc::http::StatusCode;
use awc::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The server rejected the name because another tag already uses it.
    DuplicateName,
    NotFound,
    /// Network failure or any response the adapter does not recognize.
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} store error: {}", self.kind, self.message)
    }
}

impl std::error::Error for StoreError {}

/// Remote tag persistence as seen by the authoring form: one round trip per
/// operation, no retries, failures reported as values rather than panics.
#[allow(async_fn_in_trait)]
pub trait TagStore {
    async fn create_tag(&self, name: &str) -> Result<Tag, StoreError>;
    async fn delete_tag(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Serialize)]
struct TagNameBody<'a> {
    name: &'a str,
}

/// HTTP implementation of [`TagStore`] speaking the `/api/tags` wire
/// contract.
pub struct HttpTagStore {
    client: Client,
    base_url: String,
}

impl HttpTagStore {
    pub fn new(config: &TagServiceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .finish();
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    /// Bulk fetch used once when the authoring form mounts, to seed the
    /// available tag pool. Not part of the [`TagStore`] contract.
    pub async fn fetch_all(&self) -> Result<Vec<Tag>, StoreError> {
        let mut response = self
            .client
            .get(self.tags_url())
            .send()
            .await
            .map_err(|err| StoreError::unavailable(format!("tag list request failed: {}", err)))?;

        if response.status() != StatusCode::OK {
            return Err(StoreError::unavailable(format!(
                "tag list returned {}",
                response.status()
            )));
        }
        response
            .json::<Vec<Tag>>()
            .await
            .map_err(|err| StoreError::unavailable(format!("invalid tag list payload: {}", err)))
    }
}

impl TagStore for HttpTagStore {
    async fn create_tag(&self, name: &str) -> Result<Tag, StoreError> {
        let mut response = self
            .client
            .post(self.tags_url())
            .send_json(&TagNameBody { name })
            .await
            .map_err(|err| {
                StoreError::unavailable(format!("tag create request failed: {}", err))
            })?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let tag = response.json::<Tag>().await.map_err(|err| {
                    StoreError::unavailable(format!("invalid tag create payload: {}", err))
                })?;
                log::debug!("Created tag '{}' with id {}", tag.name, tag.id);
                Ok(tag)
            }
            StatusCode::CONFLICT => Err(StoreError::new(
                StoreErrorKind::DuplicateName,
                format!("tag name '{}' already exists", name),
            )),
            status => Err(StoreError::unavailable(format!(
                "tag create returned {}",
                status
            ))),
        }
    }

    async fn delete_tag(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.tags_url(), id))
            .send()
            .await
            .map_err(|err| {
                StoreError::unavailable(format!("tag delete request failed: {}", err))
            })?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => {
                log::debug!("Deleted tag {}", id);
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(StoreError::new(
                StoreErrorKind::NotFound,
                format!("tag {} not found", id),
            )),
            status => Err(StoreError::unavailable(format!(
                "tag delete returned {}",
                status
            ))),
        }
    }
}
