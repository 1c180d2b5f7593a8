use crate::{
    app::{AppError, AppState},
    database::models::user::User,
};
use actix_web::{get, web::Data, HttpResponse};
use serde_json::json;

/// Pipe for listing users
/// - url: `{domain}/api/users`
///
/// # Response
/// ## Ok
/// - `{"users": [...]}` with every stored user
/// ## Error
/// - Internal server error
#[get("/api/users")]
pub async fn get_users(app_state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let psql_conn = app_state.psql_pool.get()?;

    let users = User::all(&psql_conn)?;

    Ok(HttpResponse::Ok().json(json!({ "users": users })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body, test, App};

    #[actix_rt::test]
    async fn test_get_users() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::get_users),
        )
        .await;

        let conn = appstate.psql_pool.get().unwrap();
        User::create(&conn, "test-philippaclaire9", "Philippa");

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let listed = payload["users"]
            .as_array()
            .unwrap()
            .iter()
            .any(|u| u["username"] == "test-philippaclaire9");
        assert!(listed);

        User::delete(&conn, "test-philippaclaire9");
    }
}
