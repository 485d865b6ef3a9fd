// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway trait definitions, one per backend resource family.
//!
//! The HTTP client in `caseline-api` implements all of them; tests substitute
//! the mocks from `caseline-test-utils`. All traits use `#[async_trait]` so
//! they can be held as `Arc<dyn Trait>`.

pub mod assistant;
pub mod catalog;
pub mod knowledge;
pub mod object_store;
pub mod support;

pub use assistant::AssistantGateway;
pub use catalog::CatalogGateway;
pub use knowledge::KnowledgeGateway;
pub use object_store::ObjectStore;
pub use support::SupportGateway;
