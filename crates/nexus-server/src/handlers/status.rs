//! Service liveness handler.

use axum::Json;

use crate::schema::status::ServiceStatusResponse;

/// `GET /`
pub async fn root() -> Json<ServiceStatusResponse> {
    Json(ServiceStatusResponse::running())
}
