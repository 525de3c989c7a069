//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) and/or CLI flags
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PingerConfig (validated, immutable)
//!     → probe + WorkerOptions built from it
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Headers are a list, not a table, so repeated names survive

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    HeaderConfig, HttpProbeConfig, LogFormat, LoggingConfig, PingerConfig, ProbeConfig,
    TcpProbeConfig, WorkerConfig,
};
pub use validation::{validate_config, ValidationError};
