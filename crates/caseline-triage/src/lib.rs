// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator workflows for the Caseline support console.
//!
//! Intake runs draft -> intent search -> case creation. Correspondence owns
//! one case's thread with optimistic replies. Both talk to the backend only
//! through the gateway traits in `caseline-core`, so they run unchanged
//! against the HTTP client or the test mocks.

pub mod attachments;
pub mod background;
pub mod banner;
pub mod correspondence;
pub mod creator;
pub mod flow;
pub mod intake;
pub mod knowledge;
pub mod matcher;
pub mod overview;

pub use attachments::{Attachment, UploadReport, content_type_for, upload_all};
pub use background::BackgroundTasks;
pub use banner::{Banner, Tone};
pub use correspondence::{Correspondence, Delivery, ThreadEntry, ThreadLimits, ThreadView};
pub use creator::CaseCreator;
pub use flow::{IntakeEvent, IntakeFlow, IntakePhase, NO_MATCH_ADVISORY};
pub use intake::{IssueDraft, count_words};
pub use knowledge::KnowledgeLibrary;
pub use matcher::{CandidateCard, ConfidenceBadge, IntentMatcher, SearchOutcome};
