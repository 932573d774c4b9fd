pub mod accounts;
pub mod health;
pub mod profiles;
pub mod recommendations;
pub mod swagger;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::database::ProfileStore;

/// Registers the store and every JSON route. Shared by `main` and the handler tests.
pub fn configure(store: web::Data<dyn ProfileStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(store)
            .app_data(json_config())
            // Health check
            .route("/health", web::get().to(health::health_check))
            // Accounts
            .route("/signup", web::post().to(accounts::signup))
            .route("/login", web::post().to(accounts::login))
            // Profiles
            .route("/profile", web::get().to(profiles::get_profile))
            .route("/editprofile", web::post().to(profiles::edit_profile))
            // Recommendations
            .route("/usersrec", web::post().to(recommendations::recommend_users));
    }
}

/// Malformed bodies answer 400 with the same `{error}` shape as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  Rejected body on {}: {}", req.path(), err);
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string()
        }));
        InternalError::from_response(err, response).into()
    })
}

#[cfg(test)]
pub(crate) fn test_store() -> web::Data<dyn ProfileStore> {
    let store: std::sync::Arc<dyn ProfileStore> = std::sync::Arc::new(crate::database::InMemoryStore::new());
    web::Data::from(store)
}

/// Reads succeed from the seeded records; bulk reads, writes and ping fail like a dropped connection
#[cfg(test)]
pub(crate) struct OfflineStore {
    seeded: crate::database::InMemoryStore,
}

#[cfg(test)]
pub(crate) async fn offline_store(seed: Vec<crate::models::ProfileRecord>) -> web::Data<dyn ProfileStore> {
    let seeded = crate::database::InMemoryStore::new();
    for record in seed {
        seeded.insert(record).await.unwrap();
    }
    let store: std::sync::Arc<dyn ProfileStore> = std::sync::Arc::new(OfflineStore { seeded });
    web::Data::from(store)
}
