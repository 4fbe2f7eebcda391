//! Starter-query suggestions shown before the first submission.

use nyaya_core::config::{default_suggestions, ChatConfig};

/// Fixed, ordered list of suggested starter queries.
///
/// Purely presentational: selecting one copies its text into the pending
/// input (see [`crate::SessionEngine::select_suggestion`]), it never
/// submits on the caller's behalf.
#[derive(Debug, Clone)]
pub struct SuggestionProvider {
    suggestions: Vec<String>,
}

impl SuggestionProvider {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self { suggestions }
    }

    /// Build from the chat configuration.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.suggestions.clone())
    }

    /// All suggestions, in display order.
    pub fn all(&self) -> &[String] {
        &self.suggestions
    }

    /// The suggestion at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.suggestions.get(index).map(String::as_str)
    }
}

impl Default for SuggestionProvider {
    fn default() -> Self {
        Self::new(default_suggestions())
    }
}
