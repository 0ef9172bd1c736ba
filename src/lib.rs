//! # tuplekv
//!
//! A minimal distributed tuple store:
//! - Directory-backed storage, one keyfile per key
//! - Private binary wire protocol over TCP (big-endian, mixed fixed- and
//!   variable-length fields)
//! - Fixed worker pool fed by a bounded connection queue with blocking
//!   backpressure
//! - Single global lock serializing all storage work
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Acceptor                                │
//! │               (main thread, TCP accept)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ blocks when full
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │              Bounded Connection Queue                        │
//! │         (monitor: mutex + two wait conditions)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Worker Pool                                │
//! │        (fixed threads, dequeue → dispatch loop)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ per request, under one global lock
//!                       ▼
//!               ┌─────────────┐
//!               │ Tuple Store │
//!               │ (keyfiles)  │
//!               └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod storage;
pub mod tuple;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::Client;
pub use config::Config;
pub use error::{Result, StoreError};
pub use network::Server;
pub use storage::TupleStore;
pub use tuple::Tuple;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tuplekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
