use crate::{
    app::{AppError, AppState},
    database::models::review::Review,
};
use actix_web::{
    get, patch,
    web::{Data, Query},
    HttpRequest, HttpResponse,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ReviewListParams {
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VotesPatch {
    inc_votes: Option<i32>,
}

/// Pipe for the filtered/sorted review listing
/// - url: `{domain}/api/reviews?category=&sort_by=&order=`
///
/// # HTTP request requirements
/// - optional `category` (an existing category slug)
/// - optional `sort_by` out of owner, title, review_id, category,
///   review_img_url, created_at, votes, designer, comment_count
///   (default `created_at`)
/// - optional `order`, `asc` or `desc` (default `desc`)
///
/// # Example
/// ```
/// let request = actix_web::test::TestRequest::get()
///     .uri("/api/reviews?category=dexterity&sort_by=votes&order=asc")
///     .to_request();
/// ```
///
/// # Response
/// ## Ok
/// - `{"reviews": [...]}`, each review carrying a `comment_count`
/// ## Error
/// - Not found (rejected sort_by/order, unknown category, or a category with
///   no reviews)
/// - Internal server error
#[get("/api/reviews")]
pub async fn get_reviews(
    params: Query<ReviewListParams>,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let psql_conn = app_state.psql_pool.get()?;

    let reviews = Review::list(
        &psql_conn,
        params.category.as_deref(),
        params.sort_by.as_deref(),
        params.order.as_deref(),
    )?;

    Ok(HttpResponse::Ok().json(json!({ "reviews": reviews })))
}

/// Pipe for reading a single review
/// - url: `{domain}/api/reviews/{review_id}`
///
/// # Response
/// ## Ok
/// - `{"review": [...]}`, a single-element array carrying the comment count
/// ## Error
/// - Bad request (non-numeric id)
/// - Not found
/// - Internal server error
#[get("/api/reviews/{review_id}")]
pub async fn get_review_by_id(
    req: HttpRequest,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let review_id = req.match_info().query("review_id").parse::<i32>()?;

    let psql_conn = app_state.psql_pool.get()?;

    let review = Review::find_by_id(&psql_conn, review_id)?;

    Ok(HttpResponse::Ok().json(json!({ "review": review })))
}

/// Pipe for incrementing a review's votes
/// - url: `{domain}/api/reviews/{review_id}`
///
/// # HTTP request requirements
/// ## body
/// - `{"inc_votes": n}` with a signed integer `n`
///
/// # Response
/// ## Ok
/// - `{"review": [...]}` with the updated row
/// ## Error
/// - Bad request (non-numeric id, missing or non-numeric `inc_votes`)
/// - Not found
/// - Internal server error
#[patch("/api/reviews/{review_id}")]
pub async fn patch_review_votes(
    req: HttpRequest,
    req_body: String,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let review_id = req.match_info().query("review_id").parse::<i32>()?;

    let patch: VotesPatch = serde_json::from_str(&req_body)?;
    let inc_votes = patch.inc_votes.ok_or(AppError::InvalidInput)?;

    let psql_conn = app_state.psql_pool.get()?;

    let review = Review::add_votes(&psql_conn, review_id, inc_votes)?;

    Ok(HttpResponse::Ok().json(json!({ "review": [review] })))
}
