// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Caseline support backend.
//!
//! [`GatewayClient`] implements every gateway trait from `caseline-core`
//! over one pooled `reqwest` client. [`HttpObjectStore`] performs the raw
//! pre-signed uploads, which must not carry the identity header.

pub mod assistant;
pub mod catalog;
pub mod client;
pub mod knowledge;
pub mod object_store;
pub mod support;
mod wire;

pub use client::GatewayClient;
pub use object_store::HttpObjectStore;
