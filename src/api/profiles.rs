use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::database::ProfileStore;
use crate::models::ProfilePatch;
use crate::services::account_service::MessageResponse;
use crate::services::profile_service;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EditProfileRequest {
    pub email: Option<String>,
    pub data: Option<ProfilePatch>,
}

/// Not-found answers 200 with an `error` body; the front-end checks the body, not the status
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profiles",
    params(ProfileQuery),
    responses(
        (status = 200, description = "`{data: profile}` when found, `{error}` otherwise"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_profile(
    store: web::Data<dyn ProfileStore>,
    query: web::Query<ProfileQuery>,
) -> HttpResponse {
    let email = query.email.as_deref().unwrap_or_default();
    log::info!("👤 GET /profile - email: {}", email);

    match profile_service::get_profile(store.get_ref(), email).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(serde_json::json!({ "data": profile })),
        Ok(None) => {
            log::warn!("⚠️ Profile not found: {}", email);
            HttpResponse::Ok().json(serde_json::json!({
                "error": "User or recruiter not found"
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to load profile {}: {}", email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/editprofile",
    tag = "Profiles",
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing email or data"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn edit_profile(
    store: web::Data<dyn ProfileStore>,
    request: web::Json<EditProfileRequest>,
) -> HttpResponse {
    let EditProfileRequest { email, data } = request.into_inner();
    let email = email.unwrap_or_default();
    log::info!("✏️  POST /editprofile - email: {}", email);

    let Some(patch) = data else {
        return AppError::Validation("email and data are required".to_string()).error_response();
    };
    if email.is_empty() {
        return AppError::Validation("email and data are required".to_string()).error_response();
    }

    match profile_service::edit_profile(store.get_ref(), &email, patch).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "Profile updated successfully".to_string(),
        }),
        Err(AppError::DatabaseError(detail)) => {
            log::error!("❌ Failed to update profile {}: {}", email, detail);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("An error occurred while updating the profile: {}", detail)
            }))
        }
        Err(e) => {
            log::warn!("❌ Profile update rejected: {} - {}", email, e);
            e.error_response()
        }
    }
}
