// This file is part of the product Inkstand.
// SPDX-FileCopyrightText: 2026 Inkstand Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod api;
pub mod config;
pub mod notify;
pub mod tags;
