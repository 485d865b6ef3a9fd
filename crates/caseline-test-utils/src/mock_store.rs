// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock pre-signed upload target.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use caseline_core::CaselineError;
use caseline_core::traits::ObjectStore;

/// One accepted upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
struct StoreState {
    attempts: usize,
    failing_attempts: HashSet<usize>,
    stored: Vec<StoredObject>,
}

/// Records uploads; chosen attempts (1-based) fail with a 500.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`-th upload attempt (1-based) fail.
    pub fn fail_attempt(&self, n: usize) -> &Self {
        self.lock().failing_attempts.insert(n);
        self
    }

    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    pub fn stored(&self) -> Vec<StoredObject> {
        self.lock().stored.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), CaselineError> {
        let mut state = self.lock();
        state.attempts += 1;
        if state.failing_attempts.contains(&state.attempts) {
            return Err(CaselineError::Http {
                status: 500,
                message: format!("upload attempt {} rejected", state.attempts),
            });
        }
        state.stored.push(StoredObject {
            url: url.to_string(),
            content_type: content_type.to_string(),
            size: body.len(),
        });
        Ok(())
    }
}
