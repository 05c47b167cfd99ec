// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async client for the Mem0 memory API.
//!
//! [`Mem0Client`] is the entry point. Requests are built in two steps: the
//! [`params::Normalizer`] drops absent values and injects the client's
//! org/project pair, then [`request`] renders the result as a query string
//! or JSON body for the route. [`ReqwestTransport`] sends them.

pub mod client;
pub mod identity;
pub mod options;
pub mod params;
pub mod request;
pub mod transport;

pub use client::{DEFAULT_TIMEOUT, Mem0Client, Mem0ClientBuilder};
pub use identity::{API_KEY_ENV, ClientIdentity};
pub use mem0_config::ApiConfig;
pub use options::{AddOptions, ListOptions, SearchOptions};
pub use request::{ApiVersion, Pagination};
pub use transport::{DEFAULT_USER_AGENT, ReqwestTransport};

// Re-export the data model so callers need a single dependency.
pub use mem0_core::*;
