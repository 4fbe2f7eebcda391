//! Conversational session engine for Nyaya.
//!
//! Owns the message log, classifies each query into a response category,
//! produces the response body from a fixed catalog, and drives a time-based
//! progressive reveal of that body with cancellation on teardown.

pub mod catalog;
pub mod classifier;
pub mod generator;
pub mod reveal;
pub mod session;
pub mod suggestions;

pub use catalog::ResponseCatalog;
pub use classifier::{Category, IntentClassifier};
pub use generator::ResponseGenerator;
pub use reveal::{Epoch, EpochGuard, RevealScheduler};
pub use session::SessionEngine;
pub use suggestions::SuggestionProvider;
