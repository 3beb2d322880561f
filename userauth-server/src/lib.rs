//! userauth-server: HTTP adapter for the userauth credential store
//!
//! Exposes credential verification and bulk seeding over HTTP:
//! - `POST /verify`: (username, hashedPassword) check, uniform envelope
//! - `GET /seed`: destructive bulk replace with synthetic users
//! - `GET /health` / `GET /ready`: liveness and storage probes

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, run_server};
pub use state::AppState;
