use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Talent Match Service API",
        version = "1.0.0",
        description = "Profiles for people and recruiters, plaintext login and a coarse \"people you may know\" list.\n\n**Authentication:** none. Every call carries its own credentials or is open.\n\n**Features:**\n- Signup and login for users and recruiters (admin login bypasses lookup)\n- Profile lookup and merge-patch editing\n- Recommendations by Haversine distance and shared school/employer\n- Health monitoring",
        contact(
            name = "Talent Match Team"
        )
    ),
    paths(
        // Accounts
        crate::api::accounts::signup,
        crate::api::accounts::login,

        // Profiles
        crate::api::profiles::get_profile,
        crate::api::profiles::edit_profile,

        // Recommendations
        crate::api::recommendations::recommend_users,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            // Accounts
            crate::services::account_service::SignupRequest,
            crate::services::account_service::LoginRequest,
            crate::services::account_service::LoginResponse,
            crate::services::account_service::LoginUser,
            crate::services::account_service::MessageResponse,
            crate::models::Role,

            // Profiles
            crate::api::profiles::EditProfileRequest,
            crate::models::ProfilePatch,
            crate::models::Location,
            crate::models::Coordinate,
            crate::models::Education,
            crate::models::Company,

            // Recommendations
            crate::api::recommendations::RecommendationRequest,
            crate::api::recommendations::RecommendationParams,
            crate::services::recommendation_service::Recommendations,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Accounts", description = "Signup and login. Passwords are compared in plaintext; role `admin` logs in without a lookup."),
        (name = "Profiles", description = "Read a profile by email and merge partial updates into it."),
        (name = "Recommendations", description = "Distance and affinity of every other profile relative to the requester."),
        (name = "Health", description = "Service and store health."),
    )
)]
pub struct ApiDoc;
