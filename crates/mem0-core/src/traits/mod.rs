// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams between the client core and its external collaborators.

pub mod transport;

pub use transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
