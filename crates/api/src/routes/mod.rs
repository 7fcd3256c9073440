pub mod contacto;
pub mod health;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contacto                      create (validated)
/// /contacto/social               update social links (validated)
/// /contacto/rules                rule set listing
/// /contacto/validate/{rule_set}  dry-run validation
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new().nest("/contacto", contacto::router(config))
}
