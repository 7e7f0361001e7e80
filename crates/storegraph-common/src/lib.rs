//! Common utilities and types for the storegraph analytics workspace

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, StoregraphError};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use types::{AppRecord, AppType, Period};
