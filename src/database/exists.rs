use diesel::{
    dsl::{exists, select},
    prelude::*,
};

use crate::app::AppError;
use crate::database::db_utils::PgPooled;
use crate::schema::{categories, comments, reviews, users};

/// The (table, column) pairs a caller is allowed to probe. Table and column
/// names never come from request input; only the carried value is bound into
/// the query.
pub enum Lookup<'a> {
    Category(&'a str),
    Review(i32),
    User(&'a str),
    Comment(i32),
}

/// Reports whether a row matching the lookup is present. An absent value is
/// simply `false`, never an error.
pub fn row_exists(conn: &PgPooled, lookup: Lookup) -> Result<bool, AppError> {
    let found = match lookup {
        Lookup::Category(slug) => {
            select(exists(categories::table.filter(categories::slug.eq(slug))))
                .get_result::<bool>(conn)?
        }
        Lookup::Review(id) => {
            select(exists(reviews::table.filter(reviews::review_id.eq(id))))
                .get_result::<bool>(conn)?
        }
        Lookup::User(username) => {
            select(exists(users::table.filter(users::username.eq(username))))
                .get_result::<bool>(conn)?
        }
        Lookup::Comment(id) => {
            select(exists(comments::table.filter(comments::comment_id.eq(id))))
                .get_result::<bool>(conn)?
        }
    };

    Ok(found)
}
