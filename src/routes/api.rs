use actix_web::{get, HttpResponse};

const ENDPOINTS: &str = include_str!("../../endpoints.json");

/// Pipe for the endpoint directory
/// - url: `{domain}/api`
///
/// # Response
/// ## Ok
/// - json description of every endpoint this service exposes
#[get("/api")]
pub async fn get_api() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(ENDPOINTS)
}

#[cfg(test)]
mod tests {
    use actix_web::{body, test, App};

    #[actix_rt::test]
    async fn test_get_api_lists_every_endpoint() {
        let app = test::init_service(App::new().service(super::get_api)).await;

        let req = test::TestRequest::get().uri("/api").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        let directory: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(directory.get("GET /api/reviews").is_some());
        assert!(directory.get("DELETE /api/comments/:comment_id").is_some());
    }
}
