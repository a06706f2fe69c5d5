//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    auth::{get_me, post_change_password, post_log_in, post_log_out},
    endpoints,
    ledger::{get_ledger, save_ledger},
    state::AppState,
    stores::{AccountStore, LedgerStore},
};

/// Return a router with all the app's routes.
///
/// `GET /ledger` is open to anonymous readers; `POST /ledger` checks for the
/// admin role inside the handler so the guard always runs before any store
/// access.
pub fn build_router<L, A>(state: AppState<L, A>) -> Router
where
    L: LedgerStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::LEDGER,
            get(get_ledger::<L, A>).post(save_ledger::<L, A>),
        )
        .route(endpoints::LOG_IN, post(post_log_in::<L, A>))
        .route(endpoints::LOG_OUT, post(post_log_out))
        .route(endpoints::ME, get(get_me))
        .route(
            endpoints::CHANGE_PASSWORD,
            post(post_change_password::<L, A>),
        )
        .with_state(state)
}
