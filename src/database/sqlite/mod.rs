use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use tracing::{debug, info};


pub mod models;
pub mod queries;

pub use models::{
    Faq, FaqRecord, FaqSummary, GroupCount, NewFaq, SearchEntry, SearchHit, UNCATEGORIZED,
};
pub use queries::{FaqQueries, SearchIndexQueries, build_match_expression};

pub type DbPool = Pool<Sqlite>;

/// Handle on the knowledge-base file
///
/// Capped at a single connection: a load run is strictly sequential.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (creating the file if needed) and migrate the database at `path`
    ///
    /// The parent directory must already exist.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to open database: {}", path.as_ref().display())
            })?;

        let database = Self { pool };
        database.run_migrations().await?;

        Ok(database)
    }

    /// Like [`Database::new`], but reports failure as [`crate::LoaderError::StoreUnavailable`]
    #[inline]
    pub async fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        Self::new(path)
            .await
            .map_err(|e| crate::LoaderError::store_unavailable(&e))
    }

    pub async fn initialize_from_config_dir(config_dir: &Path) -> Result<Self> {
        let db_path = config_dir.join(crate::config::settings::DATABASE_FILE_NAME);

        std::fs::create_dir_all(config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        Self::new(&db_path).await
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");

        sqlx::migrate!("src/database/sqlite/migrations")
            .run(&self.pool)
            .await
            .context("Failed to run schema migration")?;

        debug!("Database migrations completed successfully");
        Ok(())
    }

    /// Release the connection, waiting for it to be returned to the pool
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database connection closed");
    }

    pub async fn count_faqs(&self) -> Result<i64> {
        FaqQueries::count(&self.pool).await
    }

    pub async fn get_faq(&self, id: i64) -> Result<Option<Faq>> {
        FaqQueries::get_by_id(&self.pool, id).await
    }

    pub async fn list_faqs(&self) -> Result<Vec<Faq>> {
        FaqQueries::list_all(&self.pool).await
    }

    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<SearchHit>> {
        FaqQueries::search(&self.pool, query, limit).await
    }

    pub async fn search_entries(&self) -> Result<Vec<SearchEntry>> {
        SearchIndexQueries::list_all(&self.pool).await
    }
}
