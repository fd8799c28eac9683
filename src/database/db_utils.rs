use diesel::{
    r2d2::{ConnectionManager, Pool},
    PgConnection,
};
use log::info;

use crate::app::settings::Settings;

use super::store::{PgPool, StoreError};

embed_migrations!("migrations");

/// Builds the postgres connection pool described by `settings`.
/// Connections are opened eagerly, so an unreachable database fails here
/// rather than on the first request.
///
/// # Example
/// ```ignore
/// let settings = Settings::from_env()?;
/// let pool = psql_connect_to_db(&settings)?;
/// ```
pub fn psql_connect_to_db(settings: &Settings) -> Result<PgPool, StoreError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.database_url.as_str());

    let pool = Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(settings.connection_timeout)
        .build(manager)?;

    info!(
        "Connected to postgres (pool size {}, checkout timeout {:?})",
        settings.pool_size, settings.connection_timeout
    );
    Ok(pool)
}

/** Applies every embedded migration not yet recorded in the database */
pub fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    let conn = pool.get()?;

    run_pending_migrations(&conn)?;
    info!("Database migrations are up to date");

    Ok(())
}

pub fn run_pending_migrations(conn: &PgConnection) -> Result<(), StoreError> {
    embedded_migrations::run(conn).map_err(|err| StoreError::Unavailable(err.to_string()))
}
