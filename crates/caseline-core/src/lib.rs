// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Caseline support console.
//!
//! This crate provides the domain types, the single error type, the session
//! context, and the gateway traits used throughout the Caseline workspace.
//! The HTTP client implements the traits defined here.

pub mod catalog;
pub mod error;
pub mod session;
pub mod summary;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use catalog::{Intent, ParamKind, Tool, ToolParam, ToolRef};
pub use error::CaselineError;
pub use session::SessionContext;
pub use summary::CaseSummary;
pub use types::{
    CaseId, CaseStatus, IntentCandidate, KnowledgeFile, MessageId, MessageType, Priority,
    SenderType, SupportCase, SupportMessage,
};

// Re-export all gateway traits at crate root.
pub use traits::{
    AssistantGateway, CatalogGateway, KnowledgeGateway, ObjectStore, SupportGateway,
};
