// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw uploads to pre-signed URLs.
//!
//! Pre-signed URLs already carry their own authorization, so this client
//! sends neither the identity header nor a JSON content type.

use std::time::Duration;

use async_trait::async_trait;
use caseline_core::CaselineError;
use caseline_core::traits::ObjectStore;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    http: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(timeout: Duration) -> Result<Self, CaselineError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CaselineError::Transport {
                message: format!("failed to build upload client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), CaselineError> {
        let size = body.len();
        let response = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| CaselineError::Transport {
                message: format!("upload failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "pre-signed upload rejected");
            return Err(CaselineError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("upload rejected")
                    .to_string(),
            });
        }

        debug!(size, content_type, "object uploaded");
        Ok(())
    }
}
