// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mem0 client.
//!
//! This crate provides the error taxonomy, the memory data model and the
//! [`Transport`] trait that the request layer in `mem0-client` dispatches
//! through.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::Mem0Error;
pub use traits::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{
    AddMemoryResponse, AddMemoryResult, BatchMemoryDelete, BatchMemoryUpdate, EntitiesResponse,
    Entity, EntityType, Feedback, IdentityScope, Memory, MemoryList, Message, MessageResponse,
    Metadata, PingResponse, SearchRequest, SearchResult,
};
