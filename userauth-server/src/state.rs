//! Application state shared across handlers

use std::sync::Arc;

use userauth_core::{CredentialStore, Seeder};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: CredentialStore,
    seeder: Seeder,
    seed_count: usize,
}

impl AppState {
    pub fn new(store: CredentialStore, seeder: Seeder, seed_count: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                seeder,
                seed_count,
            }),
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.inner.store
    }

    pub fn seeder(&self) -> &Seeder {
        &self.inner.seeder
    }

    /// Number of users a `/seed` call creates
    pub fn seed_count(&self) -> usize {
        self.inner.seed_count
    }
}
