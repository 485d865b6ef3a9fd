// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring shared by every subcommand: identity, gateway, upload store and
//! the detached-task tracker.

use std::sync::Arc;
use std::time::Duration;

use caseline_api::{GatewayClient, HttpObjectStore};
use caseline_config::CaselineConfig;
use caseline_core::traits::{
    AssistantGateway, CatalogGateway, KnowledgeGateway, ObjectStore, SupportGateway,
};
use caseline_core::{CaselineError, SessionContext};
use caseline_triage::BackgroundTasks;
use tracing::debug;

/// How long to wait for detached work before the process exits.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub struct App {
    pub config: CaselineConfig,
    pub session: SessionContext,
    pub background: BackgroundTasks,
    gateway: Arc<GatewayClient>,
    store: Arc<HttpObjectStore>,
}

impl App {
    pub fn new(config: CaselineConfig, user_override: Option<&str>) -> Result<Self, CaselineError> {
        let session = caseline_config::session_context(&config, user_override)?;
        let gateway = GatewayClient::from_config(&config, session.clone())?;
        let store = HttpObjectStore::new(Duration::from_secs(config.api.timeout_secs))?;
        debug!(user_id = session.user_id(), "console ready");
        Ok(Self {
            config,
            session,
            background: BackgroundTasks::new(),
            gateway: Arc::new(gateway),
            store: Arc::new(store),
        })
    }

    pub fn support(&self) -> Arc<dyn SupportGateway> {
        self.gateway.clone()
    }

    pub fn catalog(&self) -> Arc<dyn CatalogGateway> {
        self.gateway.clone()
    }

    pub fn knowledge(&self) -> Arc<dyn KnowledgeGateway> {
        self.gateway.clone()
    }

    pub fn assistant(&self) -> Arc<dyn AssistantGateway> {
        self.gateway.clone()
    }

    pub fn store(&self) -> Arc<dyn ObjectStore> {
        self.store.clone()
    }

    /// Waits for detached work (new-case processing, message persistence).
    pub async fn shutdown(&self) {
        if self.background.in_flight() > 0 {
            debug!(in_flight = self.background.in_flight(), "waiting for background tasks");
        }
        self.background.drain(DRAIN_TIMEOUT).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_user() {
        let err = App::new(CaselineConfig::default(), None).err().unwrap();
        assert!(matches!(err, CaselineError::Config(_)));
    }

    #[test]
    fn user_override_is_enough() {
        let app = App::new(CaselineConfig::default(), Some("ops-1")).unwrap();
        assert_eq!(app.session.user_id(), "ops-1");
    }
}
