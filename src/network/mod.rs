//! Network Module
//!
//! Connection acceptance, the bounded connection queue, the worker pool and
//! per-connection request dispatch.

mod dispatcher;
mod queue;
mod server;

pub use queue::BoundedQueue;
pub use server::Server;
