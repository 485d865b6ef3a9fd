// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Caseline integration tests.
//!
//! - [`MockGateway`] - scripted in-memory backend implementing every gateway trait
//! - [`MockObjectStore`] - pre-signed upload target with per-call failure injection
//! - [`fixtures`] - small builders for sessions, configs and candidates

pub mod fixtures;
pub mod mock_gateway;
pub mod mock_store;

pub use mock_gateway::{Call, Failure, GateHandle, MockGateway, RecordedCall};
pub use mock_store::{MockObjectStore, StoredObject};
