//! userauth-core: credential storage for the userauth service
//!
//! Provides the pieces the HTTP layer is built on:
//! - [`hash::sha256_hex`]: the shared password digest primitive
//! - [`pool::ResourcePool`]: a bounded cache of reusable SQLite handles
//! - [`store::CredentialStore`]: (mail, digest) lookup on top of the pool
//! - [`seed::Seeder`]: destructive bulk replacement with synthetic users
//!
//! No HTTP or serialization concerns live here; userauth-server adapts
//! these types to the wire.

pub mod error;
pub mod hash;
pub mod pool;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
pub use hash::sha256_hex;
pub use pool::{PooledHandle, ResourcePool};
pub use seed::Seeder;
pub use store::CredentialStore;
