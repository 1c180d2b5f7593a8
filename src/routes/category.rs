use crate::{
    app::{AppError, AppState},
    database::models::category::Category,
};
use actix_web::{get, web::Data, HttpResponse};
use serde_json::json;

/// Pipe for listing categories
/// - url: `{domain}/api/categories`
///
/// # Response
/// ## Ok
/// - `{"categories": [...]}` with every stored category
/// ## Error
/// - Internal server error
#[get("/api/categories")]
pub async fn get_categories(app_state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let psql_conn = app_state.psql_pool.get()?;

    let categories = Category::all(&psql_conn)?;

    Ok(HttpResponse::Ok().json(json!({ "categories": categories })))
}
