use chrono::NaiveDateTime;
use diesel::{
    prelude::*,
    sql_types::{BigInt, Integer, Text, Timestamp},
};
use serde::Serialize;

use crate::app::AppError;
use crate::database::db_utils::PgPooled;
use crate::database::exists::{row_exists, Lookup};
use crate::database::query;
#[cfg(test)]
use crate::schema::reviews;

/// A stored review row, as returned by the vote update.
#[derive(Debug, Queryable, Clone, Serialize)]
pub struct Review {
    pub review_id: i32,
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub review_img_url: String,
    pub votes: i32,
    pub category: String,
    pub owner: String,
    pub created_at: NaiveDateTime,
}

/// A review annotated with its derived comment count. Loaded through
/// `sql_query`, so the mapping is by column name rather than table position.
#[derive(Debug, QueryableByName, Clone, Serialize)]
pub struct ReviewWithCount {
    #[sql_type = "Integer"]
    pub review_id: i32,
    #[sql_type = "Text"]
    pub title: String,
    #[sql_type = "Text"]
    pub review_body: String,
    #[sql_type = "Text"]
    pub designer: String,
    #[sql_type = "Text"]
    pub review_img_url: String,
    #[sql_type = "Integer"]
    pub votes: i32,
    #[sql_type = "Text"]
    pub category: String,
    #[sql_type = "Text"]
    pub owner: String,
    #[sql_type = "Timestamp"]
    pub created_at: NaiveDateTime,
    #[sql_type = "BigInt"]
    pub comment_count: i64,
}

impl Review {
    /// Reads one review by primary key, joined with its comment count.
    /// The single-element collection is the response shape consumers expect.
    pub fn find_by_id(conn: &PgPooled, review_id: i32) -> Result<Vec<ReviewWithCount>, AppError> {
        let rows = diesel::sql_query(query::build_review_by_id())
            .bind::<Integer, _>(review_id)
            .load::<ReviewWithCount>(conn)?;

        if rows.is_empty() {
            return Err(AppError::NotFound);
        }
        Ok(rows)
    }

    /// The filtered/sorted listing. Allow-list validation happens in the
    /// query builder before anything touches the database; the category slug
    /// is existence-checked afterwards so an unknown slug reads as `NotFound`
    /// rather than a bad query.
    pub fn list(
        conn: &PgPooled,
        category: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<ReviewWithCount>, AppError> {
        let sql = query::build_review_listing(category.is_some(), sort_by, order)?;

        match category {
            Some(slug) => {
                if !row_exists(conn, Lookup::Category(slug))? {
                    return Err(AppError::NotFound);
                }

                let rows = diesel::sql_query(sql)
                    .bind::<Text, _>(slug)
                    .load::<ReviewWithCount>(conn)?;

                // A known category with no reviews reports NotFound, not an
                // empty success. Deliberate, if debatable; consumers rely on
                // it to tell "nothing matched this filter" apart from a
                // rejected filter.
                if rows.is_empty() {
                    return Err(AppError::NotFound);
                }
                Ok(rows)
            }
            None => Ok(diesel::sql_query(sql).load::<ReviewWithCount>(conn)?),
        }
    }

    /// Applies a signed vote increment as a single relative update, so two
    /// concurrent increments both land. Votes may go negative.
    pub fn add_votes(conn: &PgPooled, review_id_in: i32, inc: i32) -> Result<Review, AppError> {
        use crate::schema::reviews::dsl::*;

        if !row_exists(conn, Lookup::Review(review_id_in))? {
            return Err(AppError::NotFound);
        }

        let updated = diesel::update(reviews.filter(review_id.eq(review_id_in)))
            .set(votes.eq(votes + inc))
            .get_result::<Review>(conn)?;

        Ok(updated)
    }
}

#[cfg(test)]
#[derive(Insertable)]
#[table_name = "reviews"]
struct ReviewInsert {
    title: String,
    review_body: String,
    designer: String,
    review_img_url: String,
    votes: i32,
    category: String,
    owner: String,
    created_at: NaiveDateTime,
}

/// Fixture management: reviews are seeded externally in production, so these
/// writers exist for the tests only.
#[cfg(test)]
impl Review {
    pub fn create(
        conn: &PgPooled,
        owner: &str,
        title: &str,
        category: &str,
        votes: i32,
    ) -> Review {
        diesel::insert_into(reviews::table)
            .values(&ReviewInsert {
                title: title.to_string(),
                review_body: String::from("Fixture review body"),
                designer: String::from("Fixture Designer"),
                review_img_url: String::from("https://images.example/board.png"),
                votes,
                category: category.to_string(),
                owner: owner.to_string(),
                created_at: chrono::Utc::now().naive_utc(),
            })
            .get_result(conn)
            .expect("failed to insert fixture review")
    }

    /// Removes a fixture review and any comments hanging off it.
    pub fn delete(conn: &PgPooled, review_id_in: i32) {
        use crate::schema::comments;
        use crate::schema::reviews::dsl::*;

        let _ = diesel::delete(
            comments::table.filter(comments::review_id.eq(review_id_in)),
        )
        .execute(conn);
        let _ = diesel::delete(reviews.filter(review_id.eq(review_id_in))).execute(conn);
    }
}
