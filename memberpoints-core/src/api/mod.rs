//! JSON API over the services.
//!
//! Routes mirror the member site's paths: `/casino/slot/spin` for the reel game,
//! `/members/...` for member-facing ledger calls and `/super_admin/...` for
//! dashboard operations. Authentication is handled in front of this router.

mod admin_routes;
mod member_routes;
mod slot_routes;

use std::net::SocketAddr;
use std::sync::Arc;
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum_server::Handle;
use serde_json::json;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::Error;
use crate::services::{LedgerService, MemberService, SheetSyncService, SlotService};
use crate::sheets::SheetSource;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub member_service: Arc<MemberService>,
    pub ledger_service: Arc<LedgerService>,
    pub slot_service: Arc<SlotService>,
    pub sync_service: Arc<SheetSyncService>,
    /// `None` when no spreadsheet credentials were configured.
    pub sheet_source: Option<Arc<dyn SheetSource>>,
}

/// An error rendered as `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(what) => ApiError::not_found(format!("Not found: {}", what)),
            Error::InsufficientPoints { .. } => ApiError::bad_request("Not enough points."),
            Error::SyncDisabled(reason) => ApiError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: format!("Spreadsheet sync is disabled: {}", reason),
            },
            e if e.is_client_error() => ApiError::bad_request(e.to_string()),
            e => {
                error!("Internal error while handling request: {:?}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error.".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

async fn method_not_allowed() -> ApiError {
    ApiError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed, use POST.".to_string(),
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/casino/slot/spin",
            post(slot_routes::reel_spin).fallback(method_not_allowed),
        )
        .route(
            "/members/slot_machine_3x3/spin",
            post(slot_routes::grid_spin).fallback(method_not_allowed),
        )
        .route("/members/{member_id}/points", get(member_routes::points))
        .route("/members/{member_id}/profile", get(member_routes::profile))
        .route("/members/{member_id}/consumptions", post(member_routes::add_consumption))
        .route("/members/{member_id}/redemptions", post(member_routes::redeem))
        .route(
            "/super_admin/members",
            get(admin_routes::list_members).post(admin_routes::create_member),
        )
        .route(
            "/super_admin/members/{member_id}",
            get(admin_routes::get_member)
                .put(admin_routes::update_member)
                .delete(admin_routes::delete_member),
        )
        .route("/super_admin/sync_google_sheets", post(admin_routes::sync_sheets))
        .route("/super_admin/sync_logs", get(admin_routes::sync_logs))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Serves the API on `addr` until `shutdown` fires.
pub async fn serve(addr: SocketAddr, state: ApiState, shutdown: oneshot::Receiver<()>) -> Result<(), Error> {
    let app = router(state);

    let handle = Handle::new();
    let handle_clone = handle.clone();
    tokio::spawn(async move {
        let _ = shutdown.await;
        info!("Shutting down HTTP API...");
        handle_clone.graceful_shutdown(None);
    });

    info!("HTTP API listening on http://{}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    info!("HTTP API stopped.");
    Ok(())
}
