// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Server half of the tag wire contract: list, create, rename, delete.
//! The directory behind it is an in-memory store; it exists so the admin
//! panel (and the test suites) have a real uniqueness-enforcing endpoint to
//! talk to, not to be a persistence engine.

use crate::tags::{normalize_tag_name, same_name};
use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug)]
pub enum DirectoryError {
    InvalidName,
    DuplicateName(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::InvalidName => write!(f, "Tag name cannot be empty"),
            DirectoryError::DuplicateName(name) => {
                write!(f, "Tag '{}' already exists", name)
            }
            DirectoryError::NotFound(id) => write!(f, "Tag '{}' not found", id),
            DirectoryError::Internal(msg) => write!(f, "Internal tag directory error: {}", msg),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Shared tag state behind the `/api/tags` routes. Names are normalized on
/// write and unique case-insensitively; ids are server-assigned.
#[derive(Debug, Default)]
pub struct TagDirectory {
    records: RwLock<Vec<TagRecord>>,
}

impl TagDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TagRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn list(&self) -> Result<Vec<TagRecord>, DirectoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| DirectoryError::Internal("tag directory lock poisoned".to_string()))?;
        Ok(records.clone())
    }

    pub fn create(&self, raw_name: &str) -> Result<TagRecord, DirectoryError> {
        let name = normalize_tag_name(raw_name);
        if name.is_empty() {
            return Err(DirectoryError::InvalidName);
        }
        let mut records = self
            .records
            .write()
            .map_err(|_| DirectoryError::Internal("tag directory lock poisoned".to_string()))?;
        if records.iter().any(|record| same_name(&record.name, &name)) {
            return Err(DirectoryError::DuplicateName(name));
        }
        let record = TagRecord {
            id: Uuid::new_v4().to_string(),
            name,
        };
        records.push(record.clone());
        Ok(record)
    }

    pub fn rename(&self, id: &str, raw_name: &str) -> Result<TagRecord, DirectoryError> {
        let name = normalize_tag_name(raw_name);
        if name.is_empty() {
            return Err(DirectoryError::InvalidName);
        }
        let mut records = self
            .records
            .write()
            .map_err(|_| DirectoryError::Internal("tag directory lock poisoned".to_string()))?;
        if records
            .iter()
            .any(|record| record.id != id && same_name(&record.name, &name))
        {
            return Err(DirectoryError::DuplicateName(name));
        }
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        record.name = name;
        Ok(record.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DirectoryError::Internal("tag directory lock poisoned".to_string()))?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(DirectoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TagNameBody {
    name: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tags")
            .route("", web::get().to(list_tags))
            .route("", web::post().to(create_tag))
            .route("/{id}", web::patch().to(rename_tag))
            .route("/{id}", web::delete().to(delete_tag)),
    );
}

fn error_response(err: &DirectoryError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        DirectoryError::InvalidName => HttpResponse::BadRequest().json(body),
        DirectoryError::DuplicateName(_) => HttpResponse::Conflict().json(body),
        DirectoryError::NotFound(_) => HttpResponse::NotFound().json(body),
        DirectoryError::Internal(msg) => {
            log::error!("Tag directory failure: {}", msg);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn list_tags(directory: web::Data<TagDirectory>) -> Result<HttpResponse> {
    match directory.list() {
        Ok(records) => Ok(HttpResponse::Ok().json(records)),
        Err(err) => Ok(error_response(&err)),
    }
}

async fn create_tag(
    directory: web::Data<TagDirectory>,
    body: web::Json<TagNameBody>,
) -> Result<HttpResponse> {
    match directory.create(&body.name) {
        Ok(record) => {
            log::info!("Created tag '{}' ({})", record.name, record.id);
            Ok(HttpResponse::Created().json(record))
        }
        Err(err) => {
            log::debug!("Tag create rejected: {}", err);
            Ok(error_response(&err))
        }
    }
}

async fn rename_tag(
    directory: web::Data<TagDirectory>,
    path: web::Path<String>,
    body: web::Json<TagNameBody>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match directory.rename(&id, &body.name) {
        Ok(record) => {
            log::info!("Renamed tag {} to '{}'", record.id, record.name);
            Ok(HttpResponse::Ok().json(record))
        }
        Err(err) => {
            log::debug!("Tag rename rejected: {}", err);
            Ok(error_response(&err))
        }
    }
}

async fn delete_tag(
    directory: web::Data<TagDirectory>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match directory.delete(&id) {
        Ok(()) => {
            log::info!("Deleted tag {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Err(err) => {
            log::debug!("Tag delete rejected: {}", err);
            Ok(error_response(&err))
        }
    }
}
