//! Resilience subsystem.
//!
//! # Design Decisions
//! - Every RPC and delivery call carries a timeout (enforced where the
//!   call is made, with Tokio's timeout facilities)
//! - Retryable delivery failures back off exponentially with jitter and
//!   are retried for as long as the process lives: a failing block blocks
//!   forward progress rather than being dropped
//! - Terminal failures are never retried

pub mod backoff;

pub use backoff::delivery_backoff;
