use diesel::prelude::*;
use serde::Serialize;

use crate::app::AppError;
use crate::database::db_utils::PgPooled;
use crate::schema::categories;

#[derive(Debug, Queryable, Clone, Serialize)]
pub struct Category {
    pub slug: String,
    pub description: String,
}

impl Category {
    /// Reads every category. Read-only reference data; only transport can
    /// make this fail.
    pub fn all(conn: &PgPooled) -> Result<Vec<Category>, AppError> {
        Ok(categories::table.load::<Category>(conn)?)
    }
}

#[cfg(test)]
#[derive(Insertable)]
#[table_name = "categories"]
struct CategoryInsert {
    slug: String,
    description: String,
}

/// Fixture management: categories are seeded externally in production, so
/// these writers exist for the tests only.
#[cfg(test)]
impl Category {
    pub fn create(conn: &PgPooled, slug: &str, description: &str) -> Category {
        diesel::insert_into(categories::table)
            .values(&CategoryInsert {
                slug: slug.to_string(),
                description: description.to_string(),
            })
            .get_result(conn)
            .expect("failed to insert fixture category")
    }

    pub fn delete(conn: &PgPooled, slug_in: &str) {
        use crate::schema::categories::dsl::*;

        let _ = diesel::delete(categories.filter(slug.eq(slug_in))).execute(conn);
    }
}
