use diesel::prelude::*;
use serde::Serialize;

use crate::app::AppError;
use crate::database::db_utils::PgPooled;
use crate::schema::users;

#[derive(Debug, Queryable, Clone, Serialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

impl User {
    /// Reads every user. Read-only reference data from this service's
    /// perspective.
    pub fn all(conn: &PgPooled) -> Result<Vec<User>, AppError> {
        Ok(users::table.load::<User>(conn)?)
    }
}

#[cfg(test)]
#[derive(Insertable)]
#[table_name = "users"]
struct UserInsert {
    username: String,
    name: String,
    avatar_url: String,
}

/// Fixture management, tests only.
#[cfg(test)]
impl User {
    pub fn create(conn: &PgPooled, username: &str, name: &str) -> User {
        diesel::insert_into(users::table)
            .values(&UserInsert {
                username: username.to_string(),
                name: name.to_string(),
                avatar_url: format!("https://avatars.example/{}.png", username),
            })
            .get_result(conn)
            .expect("failed to insert fixture user")
    }

    pub fn delete(conn: &PgPooled, username_in: &str) {
        use crate::schema::users::dsl::*;

        let _ = diesel::delete(users.filter(username.eq(username_in))).execute(conn);
    }
}
