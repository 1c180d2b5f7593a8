use crate::{
    app::{AppError, AppState},
    database::models::comment::Comment,
};
use actix_web::{delete, get, post, web::Data, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct NewCommentRequest {
    username: Option<String>,
    body: Option<String>,
}

/// Pipe for listing the comments on a review
/// - url: `{domain}/api/reviews/{review_id}/comments`
///
/// # Response
/// ## Ok
/// - `{"comments": [...]}`, newest first; empty when the review exists but
///   has no comments
/// ## Error
/// - Bad request (non-numeric id)
/// - Not found (no such review)
/// - Internal server error
#[get("/api/reviews/{review_id}/comments")]
pub async fn get_comments_by_review(
    req: HttpRequest,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let review_id = req.match_info().query("review_id").parse::<i32>()?;

    let psql_conn = app_state.psql_pool.get()?;

    let comments = Comment::find_by_review(&psql_conn, review_id)?;

    Ok(HttpResponse::Ok().json(json!({ "comments": comments })))
}

/// Pipe for creating a comment on a review
/// - url: `{domain}/api/reviews/{review_id}/comments`
///
/// # HTTP request requirements
/// ## body
/// - `{"username": ..., "body": ...}`, both non-empty; the username must
///   belong to an existing user
///
/// # Example
/// ```
/// let request = actix_web::test::TestRequest::post()
///     .uri("/api/reviews/3/comments")
///     .set_payload(r#"{"username": "bainesface", "body": "Game was great"}"#)
///     .to_request();
/// ```
///
/// # Response
/// ## Created
/// - `{"comment": [...]}`, the stored row with votes 0 and a fresh timestamp
/// ## Error
/// - Bad request (non-numeric id, missing or empty fields)
/// - Not found (no such review or username)
/// - Internal server error
#[post("/api/reviews/{review_id}/comments")]
pub async fn post_comment(
    req: HttpRequest,
    req_body: String,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let review_id = req.match_info().query("review_id").parse::<i32>()?;

    let request: NewCommentRequest = serde_json::from_str(&req_body)?;
    let username = request.username.unwrap_or_default();
    let body = request.body.unwrap_or_default();

    let psql_conn = app_state.psql_pool.get()?;

    let comment = Comment::new(&psql_conn, review_id, &username, &body)?;

    Ok(HttpResponse::Created().json(json!({ "comment": [comment] })))
}

/// Pipe for deleting a comment
/// - url: `{domain}/api/comments/{comment_id}`
///
/// # Response
/// ## No content
/// ## Error
/// - Bad request (non-numeric id)
/// - Not found (already deleted or never existed)
/// - Internal server error
#[delete("/api/comments/{comment_id}")]
pub async fn delete_comment(
    req: HttpRequest,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comment_id = req.match_info().query("comment_id").parse::<i32>()?;

    let psql_conn = app_state.psql_pool.get()?;

    Comment::delete(&psql_conn, comment_id)?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{category::Category, review::Review, user::User};
    use actix_web::{body, test, App};

    async fn read_json(resp: actix_web::dev::ServiceResponse) -> serde_json::Value {
        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn test_post_comment() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::post_comment),
        )
        .await;

        let conn = appstate.psql_pool.get().unwrap();
        Category::create(&conn, "test-commented", "fixture");
        let usr = User::create(&conn, "test-bainesface", "Baines");
        let review = Review::create(&conn, &usr.username, "Dobble", "test-commented", 0);

        let req = test::TestRequest::post()
            .uri(format!("/api/reviews/{}/comments", review.review_id).as_str())
            .set_payload(r#"{"username": "test-bainesface", "body": "Game was great"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);

        let payload = read_json(resp).await;
        let rows = payload["comment"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["votes"], 0);
        assert_eq!(rows[0]["review_id"], review.review_id);
        assert_eq!(rows[0]["author"], "test-bainesface");
        assert_eq!(rows[0]["body"], "Game was great");

        Review::delete(&conn, review.review_id);
        Category::delete(&conn, "test-commented");
        User::delete(&conn, &usr.username);
    }

    #[actix_rt::test]
    async fn test_post_comment_rejects_missing_or_empty_fields() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::post_comment),
        )
        .await;

        let conn = appstate.psql_pool.get().unwrap();
        Category::create(&conn, "test-uncommented", "fixture");
        let usr = User::create(&conn, "test-quiet", "Quiet");
        let review = Review::create(&conn, &usr.username, "Dobble", "test-uncommented", 0);

        for payload in [
            r#"{"body": "no username"}"#,
            r#"{"username": "test-quiet"}"#,
            r#"{"username": "", "body": "empty author"}"#,
            r#"{"username": "test-quiet", "body": ""}"#,
        ] {
            let req = test::TestRequest::post()
                .uri(format!("/api/reviews/{}/comments", review.review_id).as_str())
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 400);
            assert_eq!(read_json(resp).await["message"], "Bad request");
        }

        Review::delete(&conn, review.review_id);
        Category::delete(&conn, "test-uncommented");
        User::delete(&conn, &usr.username);
    }

    #[actix_rt::test]
    async fn test_post_comment_missing_review_or_author_is_404() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::post_comment),
        )
        .await;

        let conn = appstate.psql_pool.get().unwrap();
        Category::create(&conn, "test-ghosts", "fixture");
        let usr = User::create(&conn, "test-ghost-writer", "Ghost");
        let review = Review::create(&conn, &usr.username, "Dobble", "test-ghosts", 0);

        let req = test::TestRequest::post()
            .uri("/api/reviews/9999999/comments")
            .set_payload(r#"{"username": "test-ghost-writer", "body": "lost"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let req = test::TestRequest::post()
            .uri(format!("/api/reviews/{}/comments", review.review_id).as_str())
            .set_payload(r#"{"username": "test-nobody", "body": "lost"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        Review::delete(&conn, review.review_id);
        Category::delete(&conn, "test-ghosts");
        User::delete(&conn, &usr.username);
    }

    #[actix_rt::test]
    async fn test_get_comments_newest_first_and_empty_is_ok() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::get_comments_by_review),
        )
        .await;

        let conn = appstate.psql_pool.get().unwrap();
        Category::create(&conn, "test-threads", "fixture");
        let usr = User::create(&conn, "test-threader", "Threader");
        let review = Review::create(&conn, &usr.username, "Dobble", "test-threads", 0);

        // an existing review with no comments is an empty success, not 404
        let req = test::TestRequest::get()
            .uri(format!("/api/reviews/{}/comments", review.review_id).as_str())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(read_json(resp).await["comments"].as_array().unwrap().len(), 0);

        let first = Comment::new(&conn, review.review_id, &usr.username, "first").unwrap();
        let second = Comment::new(&conn, review.review_id, &usr.username, "second").unwrap();

        let req = test::TestRequest::get()
            .uri(format!("/api/reviews/{}/comments", review.review_id).as_str())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let payload = read_json(resp).await;
        let rows = payload["comments"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["comment_id"], second.comment_id);
        assert_eq!(rows[1]["comment_id"], first.comment_id);

        Review::delete(&conn, review.review_id);
        Category::delete(&conn, "test-threads");
        User::delete(&conn, &usr.username);
    }

    #[actix_rt::test]
    async fn test_get_comments_missing_review_is_404() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::get_comments_by_review),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/reviews/9999999/comments")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let req = test::TestRequest::get()
            .uri("/api/reviews/banana/comments")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_rt::test]
    async fn test_delete_comment_is_not_idempotent() {
        let appstate = AppState::new(None);

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(appstate.clone()))
                .service(super::delete_comment),
        )
        .await;

        let conn = appstate.psql_pool.get().unwrap();
        Category::create(&conn, "test-deletions", "fixture");
        let usr = User::create(&conn, "test-deleter", "Deleter");
        let review = Review::create(&conn, &usr.username, "Dobble", "test-deletions", 0);
        let comment = Comment::new(&conn, review.review_id, &usr.username, "going").unwrap();

        let req = test::TestRequest::delete()
            .uri(format!("/api/comments/{}", comment.comment_id).as_str())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 204);

        let req = test::TestRequest::delete()
            .uri(format!("/api/comments/{}", comment.comment_id).as_str())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let req = test::TestRequest::delete()
            .uri("/api/comments/banana")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        Review::delete(&conn, review.review_id);
        Category::delete(&conn, "test-deletions");
        User::delete(&conn, &usr.username);
    }
}
