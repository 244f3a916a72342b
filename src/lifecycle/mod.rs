//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Connect chain → Load credential → Subscribe
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting headers → Finish block in flight
//!         → Release subscription → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast at startup: a relay without a chain connection or a
//!   signing credential exits non-zero immediately
//! - The drain never aborts an in-flight delivery

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
