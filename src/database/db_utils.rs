use diesel::{
    r2d2::{ConnectionManager, Pool, PooledConnection},
    PgConnection,
};
use dotenv::dotenv;
use std::{env, sync::Arc};

/// A checked-out connection, as handed to the data access functions.
pub type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds a connection pool to the hosted database.
/// Uses `database_url` when given, otherwise requires `DATABASE_URL`
/// as a variable in the environment.
///
/// # Example
/// ```
/// let pool = psql_connect_to_db(None);
/// ```
pub fn psql_connect_to_db(database_url: Option<&str>) -> Arc<Pool<ConnectionManager<PgConnection>>> {
    dotenv().ok();

    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => env::var("DATABASE_URL").expect("Environment variable: 'DATABASE_URL' not set"),
    };

    let manager = ConnectionManager::<PgConnection>::new(&database_url);
    let pool = Pool::builder()
        .build(manager)
        .unwrap_or_else(|_| panic!("Error connecting to {}", database_url));

    Arc::new(pool)
}
