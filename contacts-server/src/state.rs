use crate::{
    api::contact,
    data_source::{ContactCrud, DataSource},
    error::AppError,
};
use axum::{
    extract::{FromRef, Request},
    http::StatusCode,
    middleware,
    middleware::Next,
    response::IntoResponse,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub storage: Arc<dyn DataSource>,
}

impl AppState {
    pub fn new<S: DataSource>(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    fn router_without_state() -> axum::Router<Self> {
        axum::Router::new()
            .route("/", get(contact::welcome))
            .route("/contacts", get(contact::get_all).post(contact::add))
            .route("/contact", post(contact::add))
            .route(
                "/contacts/:id",
                put(contact::edit).delete(contact::delete),
            )
            .layer(middleware::from_fn(method_not_allowed))
            .layer(TraceLayer::new_for_http())
    }

    pub fn into_router(self) -> axum::Router {
        Self::router_without_state().with_state(self)
    }
}

pub async fn method_not_allowed(req: Request, next: Next) -> impl IntoResponse {
    let resp = next.run(req).await;
    let status = resp.status();
    match status {
        StatusCode::METHOD_NOT_ALLOWED => Err(AppError::MethodNotAllowed),
        _ => Ok(resp),
    }
}

impl FromRef<AppState> for Arc<dyn ContactCrud> {
    fn from_ref(state: &AppState) -> Arc<dyn ContactCrud> {
        state.storage.contacts()
    }
}
