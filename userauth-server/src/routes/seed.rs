//! Seeding route - destructive bulk replace of the user table.

use std::time::Instant;

use axum::extract::State;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// GET /seed - Replace the user table with the configured number of
/// deterministic synthetic users. Reports rows inserted and elapsed time.
pub async fn seed(State(state): State<AppState>) -> ServerResult<String> {
    let count = state.seed_count();
    let start = Instant::now();

    let inserted = state.seeder().seed(count).map_err(|err| match err {
        userauth_core::Error::ReadOnly => ServerError::ReadOnly,
        other => ServerError::Seed(other),
    })?;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(inserted, elapsed_ms, "seed completed");
    Ok(format!(
        "Successfully created {inserted} users in {elapsed_ms:.2}ms"
    ))
}
