//! Rule-based intent classifier.
//!
//! Maps raw query text to a response [`Category`] via case-insensitive
//! substring matching against an ordered decision list.

use serde::{Deserialize, Serialize};

/// Response category assigned to a query.
///
/// A closed tag set: every query maps to exactly one of these, with
/// `GeneralFallback` absorbing anything the keyword rules miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Property,
    Divorce,
    Consumer,
    Tenant,
    GeneralFallback,
}

/// Ordered keyword rules, evaluated top to bottom; the first rule with any
/// matching keyword wins. The order is a tie-break policy, not an
/// optimization: a query containing "rental-dispute" matches the property
/// rule because it precedes the tenant rule.
const RULES: &[(&[&str], Category)] = &[
    (&["property", "dispute"], Category::Property),
    (&["divorce", "marriage"], Category::Divorce),
    (&["consumer", "complaint", "defective"], Category::Consumer),
    (&["tenant", "rent", "landlord"], Category::Tenant),
];

/// Classifies queries into response categories.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify a raw query string.
    ///
    /// Matching is substring-based, not tokenized. Blank input is gated by
    /// the session store before this is reached, but an empty query is
    /// still well defined and falls through to `GeneralFallback`.
    pub fn classify(&self, query: &str) -> Category {
        let lower = query.to_lowercase();
        for (keywords, category) in RULES {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *category;
            }
        }
        Category::GeneralFallback
    }
}

// =============================================================================
// Tests
// =============================================================================
