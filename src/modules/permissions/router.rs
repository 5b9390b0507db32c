use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_catalog;

pub fn init_permissions_router() -> Router<AppState> {
    Router::new().route("/catalog", get(get_catalog))
}
