//! # Settle Core
//!
//! Primitives for running sibling tasks that may fail independently.
//!
//! ## Architecture
//!
//! - **Settle**: Runs every task to completion and partitions outcomes into
//!   fulfilled values and rejected errors, never short-circuiting
//! - **AggregateError**: Bundles many errors into one `std::error::Error`
//!   whose message lists each child's diagnostic text
//! - **Telemetry**: Structured logging setup for applications embedding the crate
//! - **Config**: Layered configuration from files and `SETTLE__*` environment variables
//!
//! ## Example
//!
//! ```rust
//! use settle_core::prelude::*;
//! use std::future::ready;
//!
//! # tokio_test::block_on(async {
//! let result = settle(vec![ready(Ok(1)), ready(Err("one".to_string())), ready(Ok(2))]).await;
//!
//! assert_eq!(result.fulfilled, vec![1, 2]);
//! assert_eq!(result.rejected, vec!["one".to_string()]);
//!
//! let err = result.into_result("some tasks failed").unwrap_err();
//! assert_eq!(err.message(), "some tasks failed\n    one");
//! # });
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod settle;
pub mod telemetry;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::AggregateError;
    pub use crate::settle::{settle, settle_spawned, SettleResult};
}
