//! PostgreSQL-backed mapping store.

use crate::schema::media_files;
use crate::{DatabaseResult, MediaRepository, MediaRow, NewMediaRow, PgPool, establish_pool};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use linkdrop_core::MediaDescriptor;
use linkdrop_error::{DatabaseError, DatabaseErrorKind};
use tracing::{debug, info, instrument};

const CREATE_MEDIA_FILES: &str = "CREATE TABLE IF NOT EXISTS media_files (
    slug TEXT PRIMARY KEY,
    file_id TEXT NOT NULL,
    file_type TEXT NOT NULL,
    caption TEXT
)";

/// Mapping store backed by the `media_files` table.
///
/// Diesel is synchronous, so every query runs on tokio's blocking pool with a
/// connection checked out of the r2d2 pool. Slug uniqueness comes from the
/// primary key: concurrent inserts for one slug race on
/// `ON CONFLICT DO NOTHING` and exactly one of them writes.
///
/// # Example
/// ```no_run
/// use linkdrop_database::{MediaRepository, PostgresMediaRepository};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = PostgresMediaRepository::connect("postgres://localhost/linkdrop", 4)?;
///     repo.ensure_schema().await?;
///     println!("{} files", repo.count().await?);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMediaRepository {
    pool: PgPool,
}

impl PostgresMediaRepository {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool for `database_url` and wrap it.
    pub fn connect(database_url: &str, pool_size: u32) -> DatabaseResult<Self> {
        Ok(Self::new(establish_pool(database_url, pool_size)?))
    }

    /// Create the `media_files` table if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> DatabaseResult<()> {
        self.with_connection(|conn| {
            diesel::sql_query(CREATE_MEDIA_FILES)
                .execute(conn)
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Schema(e.to_string())))?;
            Ok(())
        })
        .await?;

        info!("Files table ready");
        Ok(())
    }

    /// Run `op` on a pooled connection inside the blocking thread pool.
    async fn with_connection<T, F>(&self, op: F) -> DatabaseResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut *conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    #[instrument(skip(self))]
    async fn lookup(&self, slug: &str) -> DatabaseResult<Option<MediaDescriptor>> {
        let slug = slug.to_string();

        let row = self
            .with_connection(move |conn| {
                media_files::table
                    .find(slug.as_str())
                    .select(MediaRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(DatabaseError::from)
            })
            .await?;

        debug!(found = row.is_some(), "Lookup complete");
        row.map(MediaDescriptor::try_from).transpose()
    }

    #[instrument(skip(self, descriptor), fields(slug = %descriptor.slug()))]
    async fn insert_if_absent(&self, descriptor: &MediaDescriptor) -> DatabaseResult<bool> {
        let descriptor = descriptor.clone();

        let inserted = self
            .with_connection(move |conn| {
                diesel::insert_into(media_files::table)
                    .values(NewMediaRow::from(&descriptor))
                    .on_conflict(media_files::slug)
                    .do_nothing()
                    .execute(conn)
                    .map_err(DatabaseError::from)
            })
            .await?;

        Ok(inserted == 1)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> DatabaseResult<i64> {
        self.with_connection(|conn| {
            media_files::table
                .count()
                .get_result::<i64>(conn)
                .map_err(DatabaseError::from)
        })
        .await
    }
}
