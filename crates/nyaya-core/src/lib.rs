pub mod config;
pub mod error;
pub mod types;

pub use config::NyayaConfig;
pub use error::{NyayaError, Result};
pub use types::*;
