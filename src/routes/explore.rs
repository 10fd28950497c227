use actix_web::{error, http::StatusCode, web, HttpResponse};
use validator::Validate;
use crate::core::{ExploreError, ExploreService};
use crate::models::{
    CountLikedYouRequest, ErrorResponse, HealthResponse, ListLikedYouRequest, PageQuery,
    PutDecisionRequest,
};
use crate::services::StoreError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub explore: ExploreService,
}

/// Configure all explore routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/decisions", web::post().to(put_decision))
        .route("/users/{user_id}/liked-you", web::get().to(list_liked_you))
        .route("/users/{user_id}/liked-you/new", web::get().to(list_new_liked_you))
        .route("/users/{user_id}/liked-you/count", web::get().to(count_liked_you));
}

impl ExploreError {
    fn kind(&self) -> &'static str {
        match self {
            ExploreError::InvalidPaginationToken(_) => "invalid_pagination_token",
            ExploreError::InvalidUserId(_) => "invalid_user_id",
            ExploreError::Validation(_) => "validation_failed",
            ExploreError::Storage(StoreError::AlreadyDecided { .. }) => "already_decided",
            ExploreError::Storage(StoreError::UnknownUser { .. }) => "unknown_user",
            ExploreError::Storage(StoreError::Timeout(_)) => "storage_timeout",
            ExploreError::Storage(_) => "storage_error",
        }
    }
}

impl error::ResponseError for ExploreError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExploreError::InvalidPaginationToken(_)
            | ExploreError::InvalidUserId(_)
            | ExploreError::Validation(_) => StatusCode::BAD_REQUEST,
            ExploreError::Storage(StoreError::AlreadyDecided { .. }) => StatusCode::CONFLICT,
            ExploreError::Storage(StoreError::UnknownUser { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ExploreError::Storage(StoreError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ExploreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.explore.health_check().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Record a like/pass decision
///
/// POST /api/v1/decisions
///
/// Request body:
/// ```json
/// {
///   "actorUserId": "string",
///   "recipientUserId": "string",
///   "likedRecipient": true
/// }
/// ```
async fn put_decision(
    state: web::Data<AppState>,
    req: web::Json<PutDecisionRequest>,
) -> Result<HttpResponse, ExploreError> {
    req.validate()?;

    tracing::info!(
        "Recording decision: {} -> {} (liked: {})",
        req.actor_user_id,
        req.recipient_user_id,
        req.liked_recipient
    );

    let response = state.explore.put_decision(&req).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Users who liked the given user, newest first
///
/// GET /api/v1/users/{userId}/liked-you?paginationToken=...&pageSize=...
async fn list_liked_you(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ExploreError> {
    let req = list_request(path.into_inner(), query.into_inner())?;
    let response = state.explore.list_liked_you(&req).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Users who liked the given user and have not been liked back
///
/// GET /api/v1/users/{userId}/liked-you/new?paginationToken=...&pageSize=...
async fn list_new_liked_you(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ExploreError> {
    let req = list_request(path.into_inner(), query.into_inner())?;
    let response = state.explore.list_new_liked_you(&req).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/users/{userId}/liked-you/count
async fn count_liked_you(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ExploreError> {
    let req = CountLikedYouRequest {
        recipient_user_id: path.into_inner(),
    };
    req.validate()?;

    let response = state.explore.count_liked_you(&req).await?;
    Ok(HttpResponse::Ok().json(response))
}

fn list_request(user_id: String, query: PageQuery) -> Result<ListLikedYouRequest, ExploreError> {
    let req = ListLikedYouRequest {
        recipient_user_id: user_id,
        pagination_token: query.pagination_token,
        page_size: query.page_size,
    };
    req.validate()?;
    Ok(req)
}
