//! Route definitions for the `/contacto` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use contacto_core::contacto::{CREATE_CONTACTO, UPDATE_CONTACTO};

use crate::config::ServerConfig;
use crate::handlers::contacto;
use crate::middleware::validate::{validate, RuleGuard};
use crate::state::AppState;

/// Routes mounted at `/contacto`.
///
/// ```text
/// POST   /                      -> create_contacto  (create rules)
/// PUT    /social                -> update_contacto  (update rules)
/// GET    /rules                 -> list_rule_sets
/// POST   /validate/{rule_set}   -> dry_run
/// ```
///
/// Each validated route carries its own finalizer, configured from
/// [`ServerConfig::contacto`].
pub fn router(config: &ServerConfig) -> Router<AppState> {
    let create_guard = RuleGuard::new(
        &CREATE_CONTACTO,
        config.contacto.create,
        config.body_limit_bytes,
    );
    let update_guard = RuleGuard::new(
        &UPDATE_CONTACTO,
        config.contacto.update,
        config.body_limit_bytes,
    );

    let create = Router::new()
        .route("/", post(contacto::create_contacto))
        .route_layer(from_fn_with_state(create_guard, validate));

    let update = Router::new()
        .route("/social", put(contacto::update_contacto))
        .route_layer(from_fn_with_state(update_guard, validate));

    Router::new()
        .merge(create)
        .merge(update)
        .route("/rules", get(contacto::list_rule_sets))
        .route("/validate/{rule_set}", post(contacto::dry_run))
}
