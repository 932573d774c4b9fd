use serde::{Deserialize, Serialize};

use crate::{
    database::ProfileStore,
    models::{deserialize_optional_text, Person, ProfileCore, ProfileRecord, Recruiter, Role},
    utils::AppError,
};

// Request/Response structures
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub role: Option<String>,
    /// Required for recruiters
    pub company_name: Option<String>,
    /// Recruiter id, required for recruiters
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub mail: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

/// Treats `None` and blank strings alike
fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// User or recruiter signup
pub async fn signup(store: &dyn ProfileStore, request: SignupRequest) -> Result<MessageResponse, AppError> {
    let (email, password) = match (required(&request.email), required(&request.password)) {
        (Some(email), Some(password)) => (email.to_string(), password.to_string()),
        _ => return Err(AppError::Validation("email and password are required".to_string())),
    };

    if let Some(confirm) = request.confirm_password.as_deref() {
        if confirm != password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
    }

    // Not atomic with the insert below: two concurrent signups can both pass this check
    if store.email_exists(&email).await? {
        return Err(AppError::Conflict("User or recruiter already exists".to_string()));
    }

    let role = request.role.as_deref().and_then(Role::parse);

    let record = match role {
        Some(Role::Recruiter) => {
            let (company_name, recruiter_id) = match (required(&request.company_name), required(&request.id)) {
                (Some(company), Some(id)) => (company.to_string(), id.to_string()),
                _ => {
                    return Err(AppError::Validation(
                        "Company name and ID are required for recruiters".to_string(),
                    ))
                }
            };

            ProfileRecord::Recruiter(Recruiter {
                id: None,
                core: ProfileCore::new(request.first_name, request.last_name, email.clone(), password, Role::Recruiter),
                company_name,
                recruiter_id,
            })
        }
        Some(Role::User) => ProfileRecord::Person(Person {
            id: None,
            core: ProfileCore::new(request.first_name, request.last_name, email.clone(), password, Role::User),
        }),
        _ => {
            return Err(AppError::Validation(format!(
                "Invalid role: {}. Supported: user, recruiter",
                request.role.as_deref().unwrap_or("none")
            )))
        }
    };

    let kind = record.kind();
    let id = store.insert(record).await?;

    log::info!("✅ Profile created: {} ({:?}, id {})", email, kind, id.to_hex());

    Ok(MessageResponse {
        message: "User or recruiter created successfully".to_string(),
    })
}

// Plaintext credential check; admins are let through without a lookup
pub async fn login(store: &dyn ProfileStore, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    let (email, password, role) = match (
        required(&request.mail),
        required(&request.password),
        required(&request.role),
    ) {
        (Some(email), Some(password), Some(role)) => (email, password, role),
        _ => {
            return Err(AppError::Validation(
                "email, password, and role are required".to_string(),
            ))
        }
    };

    let role = Role::parse(role)
        .ok_or_else(|| AppError::Validation(format!("Invalid role: {}", role)))?;

    if role == Role::Admin {
        return Ok(LoginResponse {
            message: "Login successful".to_string(),
            user: LoginUser {
                firstname: None,
                lastname: None,
                email: None,
                role,
            },
        });
    }

    // Only the collection the role names is consulted
    let core = match role {
        Role::User => store.find_person_by_email(email).await?.map(|p| p.core),
        Role::Recruiter => store.find_recruiter_by_email(email).await?.map(|r| r.core),
        Role::Admin => None,
    };

    let core = core
        .filter(|c| c.password == password)
        .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

    Ok(LoginResponse {
        message: "Login successful".to_string(),
        user: LoginUser {
            firstname: core.firstname,
            lastname: core.lastname,
            email: Some(core.email),
            role,
        },
    })
}
