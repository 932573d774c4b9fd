use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::database::ProfileStore;
use crate::services::recommendation_service::{self, Recommendations};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RecommendationParams {
    pub email: String,
}

/// The front-end wraps the email in `params`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RecommendationRequest {
    pub params: RecommendationParams,
}

#[utoipa::path(
    post,
    path = "/usersrec",
    tag = "Recommendations",
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Distance (km) and priority for every other profile, in store order", body = Recommendations),
        (status = 404, description = "Requesting profile not found"),
        (status = 422, description = "A profile involved has no usable location"),
        (status = 500, description = "Database error")
    )
)]
pub async fn recommend_users(
    store: web::Data<dyn ProfileStore>,
    request: web::Json<RecommendationRequest>,
) -> HttpResponse {
    let email = &request.params.email;
    log::info!("🧭 POST /usersrec - email: {}", email);

    match recommendation_service::recommend(store.get_ref(), email).await {
        Ok(recommendations) => {
            log::info!("✅ {} recommendations for {}", recommendations.len(), email);
            HttpResponse::Ok().json(recommendations)
        }
        Err(e) => {
            log::error!("❌ Recommendation failed for {}: {}", email, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use crate::api::{self, offline_store, test_store};
    use crate::database::ProfileStore;
    use crate::models::{Location, Person, ProfileCore, ProfileRecord, Role};

    fn located(email: &str, lat: f64, lon: f64) -> ProfileRecord {
        let mut core = ProfileCore::new(None, None, email, "pw", Role::User);
        core.location = Some(Location::new(lat, lon));
        ProfileRecord::Person(Person { id: None, core })
    }

    #[actix_web::test]
    async fn test_usersrec_returns_parallel_lists() {
        let store = test_store();
        for (email, lon) in [("a@x.com", 0.0), ("b@x.com", 90.0), ("c@x.com", 0.0)] {
            store.insert(located(email, 0.0, lon)).await.unwrap();
        }
        let app = test::init_service(App::new().configure(api::configure(store))).await;

        let req = test::TestRequest::post()
            .uri("/usersrec")
            .set_json(serde_json::json!({ "params": { "email": "a@x.com" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = test::read_body_json(resp).await;
        let distances = json["distances"].as_array().unwrap();
        let priorities = json["priorities"].as_array().unwrap();
        assert_eq!(distances.len(), 2);
        assert_eq!(priorities, &vec![serde_json::json!(5), serde_json::json!(5)]);
        assert!((distances[0].as_f64().unwrap() - 10007.5).abs() < 0.1);
        assert_eq!(distances[1].as_f64().unwrap(), 0.0);
    }

    #[actix_web::test]
    async fn test_usersrec_unknown_email_is_404() {
        let app = test::init_service(App::new().configure(api::configure(test_store()))).await;

        let req = test::TestRequest::post()
            .uri("/usersrec")
            .set_json(serde_json::json!({ "params": { "email": "ghost@x.com" } }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_usersrec_missing_location_is_422() {
        let store = test_store();
        store.insert(located("a@x.com", 1.0, 1.0)).await.unwrap();
        store
            .insert(ProfileRecord::Person(Person {
                id: None,
                core: ProfileCore::new(None, None, "b@x.com", "pw", Role::User),
            }))
            .await
            .unwrap();
        let app = test::init_service(App::new().configure(api::configure(store))).await;

        let req = test::TestRequest::post()
            .uri("/usersrec")
            .set_json(serde_json::json!({ "params": { "email": "a@x.com" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert!(json.get("distances").is_none());
    }

    #[actix_web::test]
    async fn test_usersrec_malformed_body_is_400() {
        let app = test::init_service(App::new().configure(api::configure(test_store()))).await;

        let req = test::TestRequest::post()
            .uri("/usersrec")
            .set_json(serde_json::json!({ "email": "a@x.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert!(json["error"].is_string());
    }

    #[actix_web::test]
    async fn test_usersrec_store_failure_is_500() {
        let store = offline_store(vec![located("a@x.com", 1.0, 1.0)]).await;
        let app = test::init_service(App::new().configure(api::configure(store))).await;

        let req = test::TestRequest::post()
            .uri("/usersrec")
            .set_json(serde_json::json!({ "params": { "email": "a@x.com" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"], "Database error: connection reset by peer");
    }
}
