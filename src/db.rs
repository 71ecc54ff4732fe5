use crate::config::DatabaseSettings;
use crate::user::StoreError;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::sql_query;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    password TEXT NOT NULL,
    email TEXT NOT NULL,
    date_of_birth DATE,
    date_created TIMESTAMP NOT NULL DEFAULT NOW()
)";

/// Builds the process-wide pool and makes sure the `users` table exists.
pub fn init(settings: &DatabaseSettings) -> Result<Pool, StoreError> {
    info!("Initializing database pool");

    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    let pool = Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(settings.connect_timeout)
        .build(manager)?;

    let conn = pool.get()?;
    sql_query(CREATE_USERS).execute(&conn)?;

    Ok(pool)
}
