// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Mem0 client.
//!
//! - [`RecordingTransport`] - spy transport that records every request and
//!   answers from a queue of canned responses

pub mod recording;

pub use recording::RecordingTransport;
