use actix_web::{web, HttpResponse, ResponseError};
use crate::database::ProfileStore;
use crate::services::account_service::{self, LoginRequest, LoginResponse, MessageResponse, SignupRequest};

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Accounts",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Profile created", body = MessageResponse),
        (status = 400, description = "Missing fields, unsupported role or recruiter without company/id"),
        (status = 409, description = "Email already registered as user or recruiter")
    )
)]
pub async fn signup(
    store: web::Data<dyn ProfileStore>,
    request: web::Json<SignupRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email = request.email.clone().unwrap_or_else(|| "N/A".to_string());
    let role = request.role.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📝 POST /signup - email: {}, role: {}", email, role);

    match account_service::signup(store.get_ref(), request).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => {
            log::warn!("❌ Signup failed: {} - {}", email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "email, password and role are required"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    store: web::Data<dyn ProfileStore>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    let email = request.mail.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /login - email: {}, role: {}", email, request.role.as_deref().unwrap_or("N/A"));

    match account_service::login(store.get_ref(), &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email, e);
            e.error_response()
        }
    }
}
