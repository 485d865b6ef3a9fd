// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent and tool management endpoints.

use async_trait::async_trait;

use crate::catalog::{Intent, Tool};
use crate::error::CaselineError;

/// Gateway to the `/intents` and `/tools` resources.
#[async_trait]
pub trait CatalogGateway: Send + Sync + 'static {
    async fn list_intents(&self) -> Result<Vec<Intent>, CaselineError>;

    async fn create_intent(&self, intent: &Intent) -> Result<(), CaselineError>;

    /// Updates the intent identified by `intent.intentid`.
    async fn update_intent(&self, intent: &Intent) -> Result<(), CaselineError>;

    async fn delete_intent(&self, intent_id: &str) -> Result<(), CaselineError>;

    async fn list_tools(&self) -> Result<Vec<Tool>, CaselineError>;

    async fn create_tool(&self, tool: &Tool) -> Result<(), CaselineError>;

    /// Replaces the tool with the same name; names never change.
    async fn update_tool(&self, tool: &Tool) -> Result<(), CaselineError>;

    async fn delete_tool(&self, name: &str) -> Result<(), CaselineError>;
}
