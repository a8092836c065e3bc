//! Server startup: logging and wiring helpers

pub mod logging;

pub use logging::{LoggingConfig, init_logging};
