//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::{info, instrument};

/// Pooled PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Build a connection pool for `database_url`.
///
/// One connection is checked out immediately so a bad URL fails at startup
/// instead of on the first request.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the warm-up connection
/// fails.
#[instrument(skip(database_url))]
pub fn establish_pool(database_url: &str, max_size: u32) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;

    // Warm up the pool by getting and immediately releasing a connection
    {
        let _conn = pool.get()?;
    }

    info!(max_size, "PostgreSQL connection pool ready");
    Ok(pool)
}
