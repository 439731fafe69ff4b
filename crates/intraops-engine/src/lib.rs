//! IntraOps Engine - composition root
//!
//! Loads the application configuration and wires the command and query
//! buses, their decorator pipeline and the SQLite repositories together.

pub mod config;
pub mod services;

pub use config::{AppConfig, OperatorConfig, PipelineConfig};
pub use services::Services;
