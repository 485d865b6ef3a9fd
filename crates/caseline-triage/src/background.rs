// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detached fire-and-forget work.
//!
//! Callers never await these tasks. Failures are logged and never surfaced.
//! [`BackgroundTasks::drain`] lets a short-lived process wait for in-flight
//! work before it exits.

use std::future::Future;
use std::time::Duration;

use caseline_core::CaselineError;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    tracker: TaskTracker,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `work` without waiting for it. An error is logged with `label`.
    pub fn spawn_detached<F>(&self, label: &'static str, work: F)
    where
        F: Future<Output = Result<(), CaselineError>> + Send + 'static,
    {
        self.tracker.spawn(async move {
            match work.await {
                Ok(()) => debug!(task = label, "background task finished"),
                Err(e) => warn!(task = label, error = %e, "background task failed"),
            }
        });
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Waits up to `timeout` for in-flight tasks. Returns false on timeout.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let finished = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();
        if !finished {
            warn!(remaining = self.tracker.len(), "background tasks still running at drain timeout");
        }
        finished
    }
}
