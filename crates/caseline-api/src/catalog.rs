// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/intents` and `/tools` endpoints.

use async_trait::async_trait;
use caseline_core::CaselineError;
use caseline_core::catalog::{Intent, Tool};
use caseline_core::traits::CatalogGateway;
use reqwest::Method;

use crate::client::GatewayClient;
use crate::wire::{ToolCreate, ToolUpdate};

#[async_trait]
impl CatalogGateway for GatewayClient {
    async fn list_intents(&self) -> Result<Vec<Intent>, CaselineError> {
        let url = self.endpoint(&["intents"])?;
        self.get_list("list_intents", url).await
    }

    async fn create_intent(&self, intent: &Intent) -> Result<(), CaselineError> {
        let url = self.endpoint(&["intents"])?;
        self.send_raw("create_intent", Method::POST, url, Some(intent))
            .await?;
        Ok(())
    }

    async fn update_intent(&self, intent: &Intent) -> Result<(), CaselineError> {
        let id = intent
            .intentid
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CaselineError::validation("intentid", "Intent id is required to update"))?;
        let url = self.endpoint(&["intents", id])?;
        self.send_raw("update_intent", Method::PUT, url, Some(intent))
            .await?;
        Ok(())
    }

    async fn delete_intent(&self, intent_id: &str) -> Result<(), CaselineError> {
        let url = self.endpoint(&["intents", intent_id])?;
        self.send_raw::<()>("delete_intent", Method::DELETE, url, None)
            .await?;
        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<Tool>, CaselineError> {
        let url = self.endpoint(&["tools"])?;
        self.get_list("list_tools", url).await
    }

    async fn create_tool(&self, tool: &Tool) -> Result<(), CaselineError> {
        let url = self.endpoint(&["tools"])?;
        self.send_raw("create_tool", Method::POST, url, Some(&ToolCreate { tool }))
            .await?;
        Ok(())
    }

    async fn update_tool(&self, tool: &Tool) -> Result<(), CaselineError> {
        let url = self.endpoint(&["tools"])?;
        let body = ToolUpdate {
            updated_tool: tool,
            name: &tool.name,
        };
        self.send_raw("update_tool", Method::PUT, url, Some(&body))
            .await?;
        Ok(())
    }

    async fn delete_tool(&self, name: &str) -> Result<(), CaselineError> {
        let url = self.endpoint(&["tools", name])?;
        self.send_raw::<()>("delete_tool", Method::DELETE, url, None)
            .await?;
        Ok(())
    }
}
