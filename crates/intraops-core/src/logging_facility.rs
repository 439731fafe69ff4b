//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Canonical operation macros (`log_op_start!`, `log_op_end!`,
//!   `log_op_error!`, `log_op_rejected!`)
//! - Test capture mode for deterministic assertions
//!
//! The logging decorator of the dispatch pipeline is the main producer of
//! these events; handlers normally log nothing themselves.
//!
//! ```rust
//! use intraops_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
