//! Route handlers for userauth-server
//!
//! - verify: credential verification with the uniform envelope
//! - seed: destructive bulk replace of the user table
//! - health: liveness and storage readiness probes

pub mod health;
pub mod seed;
pub mod verify;

pub use health::*;
pub use seed::*;
pub use verify::*;
