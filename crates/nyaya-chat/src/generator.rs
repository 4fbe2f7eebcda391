//! Response generation.
//!
//! Composes the classifier and catalog into a single entry point: a pure
//! function from query text to guidance text.

use crate::catalog::ResponseCatalog;
use crate::classifier::IntentClassifier;

/// Generates the response body for a query.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseGenerator {
    classifier: IntentClassifier,
    catalog: ResponseCatalog,
}

impl ResponseGenerator {
    /// Create a new generator over the fixed catalog.
    pub fn new() -> Self {
        Self {
            classifier: IntentClassifier::new(),
            catalog: ResponseCatalog::new(),
        }
    }

    /// Generate the canned response for a query.
    ///
    /// Output is a pure function of the input text and the fixed catalog.
    pub fn generate(&self, query: &str) -> String {
        let category = self.classifier.classify(query);
        tracing::debug!(?category, "Query classified");
        self.catalog.render(category, query)
    }
}
