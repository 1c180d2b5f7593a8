use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::app::AppError;
use crate::database::db_utils::PgPooled;
use crate::database::exists::{row_exists, Lookup};
use crate::schema::comments;

#[derive(Debug, Queryable, Clone, Serialize)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub votes: i32,
    pub author: String,
    pub review_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
struct CommentInsert {
    body: String,
    votes: i32,
    author: String,
    review_id: i32,
    created_at: NaiveDateTime,
}

impl Comment {
    /// Creates a comment on the review specified. The author username and
    /// body must both be present and non-empty, and the review and author
    /// must already exist; votes start at 0 and `created_at` is assigned
    /// here, never taken from the request.
    pub fn new(
        conn: &PgPooled,
        review_id_in: i32,
        username: &str,
        body_in: &str,
    ) -> Result<Comment, AppError> {
        if username.is_empty() || body_in.is_empty() {
            return Err(AppError::InvalidInput);
        }
        if !row_exists(conn, Lookup::Review(review_id_in))? {
            return Err(AppError::NotFound);
        }
        if !row_exists(conn, Lookup::User(username))? {
            return Err(AppError::NotFound);
        }

        let record = CommentInsert {
            body: body_in.to_string(),
            votes: 0,
            author: username.to_string(),
            review_id: review_id_in,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let inserted = diesel::insert_into(comments::table)
            .values(&record)
            .get_result::<Comment>(conn)?;

        Ok(inserted)
    }

    /// Reads the comments on a review, newest first. The review's existence
    /// is checked unconditionally: a missing review is `NotFound`, while an
    /// existing review with no comments is an empty success.
    pub fn find_by_review(conn: &PgPooled, review_id_in: i32) -> Result<Vec<Comment>, AppError> {
        use crate::schema::comments::dsl::*;

        if !row_exists(conn, Lookup::Review(review_id_in))? {
            return Err(AppError::NotFound);
        }

        let rows = comments
            .filter(review_id.eq(review_id_in))
            .order(created_at.desc())
            .load::<Comment>(conn)?;

        Ok(rows)
    }

    /// Deletes a comment by primary key. `NotFound` when it was never there,
    /// which makes a second delete of the same id fail rather than succeed
    /// silently.
    pub fn delete(conn: &PgPooled, comment_id_in: i32) -> Result<(), AppError> {
        use crate::schema::comments::dsl::*;

        if !row_exists(conn, Lookup::Comment(comment_id_in))? {
            return Err(AppError::NotFound);
        }

        diesel::delete(comments.filter(comment_id.eq(comment_id_in))).execute(conn)?;

        Ok(())
    }
}
