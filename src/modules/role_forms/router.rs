use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    clear_all, close_role_form, get_role_form, open_role_form, reset_role_form, select_all,
    submit_role_form, toggle_node,
};

pub fn init_role_forms_router() -> Router<AppState> {
    Router::new()
        .route("/", post(open_role_form))
        .route("/{id}", get(get_role_form).delete(close_role_form))
        .route("/{id}/toggle", post(toggle_node))
        .route("/{id}/select-all", post(select_all))
        .route("/{id}/clear-all", post(clear_all))
        .route("/{id}/reset", post(reset_role_form))
        .route("/{id}/submit", post(submit_role_form))
}
