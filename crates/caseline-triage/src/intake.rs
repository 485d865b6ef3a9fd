// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The free-text issue draft and its minimum-length gate.

use caseline_core::CaselineError;

/// Whitespace-delimited words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Issue text being composed, with its word count kept current.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    text: String,
    word_count: usize,
    min_words: usize,
    no_match_advisory: bool,
}

impl IssueDraft {
    pub fn new(min_words: usize) -> Self {
        Self {
            text: String::new(),
            word_count: 0,
            min_words,
            no_match_advisory: false,
        }
    }

    /// Replaces the text. Editing hides any "no category found" advisory.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.word_count = count_words(&self.text);
        self.no_match_advisory = false;
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }

    pub fn meets_minimum(&self) -> bool {
        self.word_count >= self.min_words
    }

    /// Whether the search action is enabled.
    pub fn can_search(&self) -> bool {
        !self.text.trim().is_empty() && self.meets_minimum()
    }

    pub fn words_remaining(&self) -> usize {
        self.min_words.saturating_sub(self.word_count)
    }

    /// Inline hint shown under the field while the draft is too short.
    pub fn hint(&self) -> Option<String> {
        (self.word_count > 0 && !self.meets_minimum()).then(|| {
            format!(
                "Please add {} more words to enable search",
                self.words_remaining()
            )
        })
    }

    pub(crate) fn show_no_match(&mut self) {
        self.no_match_advisory = true;
    }

    pub fn shows_no_match(&self) -> bool {
        self.no_match_advisory
    }

    /// The trimmed text, or the validation error that blocks searching.
    pub fn validate(&self) -> Result<&str, CaselineError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(CaselineError::validation(
                "issue",
                "Please describe your issue to continue",
            ));
        }
        if !self.meets_minimum() {
            return Err(CaselineError::validation(
                "issue",
                format!(
                    "Please provide at least {} words in your description to search for matching categories",
                    self.min_words
                ),
            ));
        }
        Ok(trimmed)
    }
}
