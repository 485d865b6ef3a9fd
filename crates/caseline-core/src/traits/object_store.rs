// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct uploads to object storage through pre-signed URLs.

use async_trait::async_trait;

use crate::error::CaselineError;

/// Writes raw bytes to a pre-signed URL.
///
/// Implementations must not attach the console identity header: the URL
/// already carries its own credentials.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), CaselineError>;
}
