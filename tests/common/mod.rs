// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::{web, App, HttpServer};
use inkstand::api;
use inkstand::api::tags::{TagDirectory, TagRecord};
use std::net::TcpListener;

/// Starts the tag service on an ephemeral port and returns its base URL plus
/// a handle on the shared directory, so tests can assert on server-side
/// state directly.
pub async fn start_tag_service(seed: &[(&str, &str)]) -> (String, web::Data<TagDirectory>) {
    let records = seed
        .iter()
        .map(|(id, name)| TagRecord {
            id: (*id).to_string(),
            name: (*name).to_string(),
        })
        .collect();
    let directory = web::Data::new(TagDirectory::with_records(records));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");

    let directory_for_app = directory.clone();
    actix_web::rt::spawn(async move {
        let _ = HttpServer::new(move || {
            App::new()
                .app_data(directory_for_app.clone())
                .configure(api::tags::configure)
        })
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run()
        .await;
    });

    (format!("http://{}", addr), directory)
}

/// A base URL nothing listens on, for exercising network-failure paths.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}
