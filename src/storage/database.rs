//! SQLite Persistence Gateway
//!
//! Pooled SQLite access for generated documentation:
//! - Connection pooling via r2d2 for concurrent writers
//! - WAL mode and foreign keys on every connection
//! - Path-keyed upserts so re-runs replace earlier documents
//! - Prompt overrides served from the settings table

use std::path::Path;
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::prompts::PromptStore;
use crate::storage::DocumentStore;
use crate::types::{DocError, DocLevel, DocumentRecord, Result, SectionRecord};

/// Shared database handle for async contexts.
pub type SharedDatabase = Arc<Database>;

const SCHEMA: &str = include_str!("schema.sql");

/// Current schema version, recorded in `user_version`.
const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Pool Configuration
// ============================================================================

/// Connection pool configuration.
///
/// Pool size is derived from CPU cores with sensible bounds.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,
    /// Minimum idle connections to keep ready
    pub min_idle: u32,
    /// Timeout for acquiring a connection (seconds)
    pub connection_timeout_secs: u64,
}

impl PoolConfig {
    const MIN_POOL_SIZE: u32 = 4;
    const MAX_POOL_SIZE: u32 = 32;

    /// clamp(cores * 2, MIN, MAX)
    pub fn optimal_pool_size() -> u32 {
        let cores = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);
        (cores * 2).clamp(Self::MIN_POOL_SIZE, Self::MAX_POOL_SIZE)
    }

    /// Config with automatic pool sizing.
    pub fn auto() -> Self {
        let max_size = Self::optimal_pool_size();
        Self {
            max_size,
            min_idle: (max_size / 4).max(2),
            connection_timeout_secs: 30,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::auto()
    }
}

// ============================================================================
// Database
// ============================================================================

/// Thread-safe documentation database with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open the database with default pooling at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, PoolConfig::default())
    }

    /// Open the database with custom pool configuration.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: PoolConfig) -> Result<Self> {
        let manager =
            SqliteConnectionManager::file(path.as_ref()).with_init(Self::configure_connection);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle))
            .connection_timeout(std::time::Duration::from_secs(
                config.connection_timeout_secs,
            ))
            .build(manager)
            .map_err(|e| {
                DocError::Persistence(format!("failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool })
    }

    /// Open an in-memory database for testing or temporary use.
    pub fn open_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory().with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(1).build(manager).map_err(|e| {
            DocError::Persistence(format!("failed to create in-memory pool: {}", e))
        })?;

        Ok(Self { pool })
    }

    fn configure_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA cache_size = -64000;
            PRAGMA busy_timeout = 5000;
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            DocError::Persistence(format!("failed to acquire database connection: {}", e))
        })
    }

    /// Create the schema and stamp the version.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }

    // ========================================================================
    // Documentation Queries
    // ========================================================================

    /// Fetch the stored document for one path, if any.
    pub fn fetch_document(&self, path: &str) -> Result<Option<DocumentRecord>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT user_id, path, doc, project_name, level, root_path, model
             FROM documentation WHERE path = ?1",
            params![path],
            Self::map_document_row,
        )
        .optional()
        .map_err(DocError::from)
    }

    /// All stored documents for a project, ordered by path.
    pub fn project_documents(&self, project_name: &str) -> Result<Vec<DocumentRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, path, doc, project_name, level, root_path, model
             FROM documentation WHERE project_name = ?1 ORDER BY path",
        )?;
        let rows = stmt
            .query_map(params![project_name], Self::map_document_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Section rows for one stored document, in insertion order.
    pub fn document_sections(&self, document_id: i64) -> Result<Vec<SectionRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT section_name, section_content, prompt_used
             FROM documentation_sections WHERE documentation_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![document_id], |row| {
                Ok(SectionRecord {
                    name: row.get(0)?,
                    content: row.get(1)?,
                    prompt: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn map_document_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DocumentRecord> {
        let level_str: String = row.get(4)?;
        let level = DocLevel::parse(&level_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("unknown documentation level '{}'", level_str).into(),
            )
        })?;
        Ok(DocumentRecord {
            user_id: row.get(0)?,
            path: row.get(1)?,
            content: row.get(2)?,
            project_name: row.get(3)?,
            level,
            root_path: row.get(5)?,
            model: row.get(6)?,
        })
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Insert or replace one settings entry.
    pub fn set_setting(&self, key: &str, value: &str, category: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn()?.execute(
            "INSERT INTO settings (key, value, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 category = excluded.category,
                 updated_at = excluded.updated_at",
            params![key, value, category, now],
        )?;
        Ok(())
    }

    /// Fetch one settings value.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(DocError::from)
    }
}

impl DocumentStore for Database {
    fn store_document(&self, record: &DocumentRecord) -> Result<i64> {
        let now = chrono::Utc::now().to_rfc3339();
        let conn = self.conn()?;
        let id: i64 = conn.query_row(
            "INSERT INTO documentation
                 (user_id, path, doc, project_name, level, root_path, model,
                  created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT(path) DO UPDATE SET
                 user_id = excluded.user_id,
                 doc = excluded.doc,
                 project_name = excluded.project_name,
                 level = excluded.level,
                 root_path = excluded.root_path,
                 model = excluded.model,
                 updated_at = excluded.updated_at
             RETURNING id",
            params![
                record.user_id,
                record.path,
                record.content,
                record.project_name,
                record.level.as_str(),
                record.root_path,
                record.model,
                now,
            ],
            |row| row.get(0),
        )?;

        // A replaced document starts with a clean section set; the fresh
        // rows arrive through store_section afterwards.
        conn.execute(
            "DELETE FROM documentation_sections WHERE documentation_id = ?1",
            params![id],
        )?;

        Ok(id)
    }

    fn store_section(&self, document_id: i64, section: &SectionRecord) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn()?.execute(
            "INSERT INTO documentation_sections
                 (documentation_id, section_name, section_content, prompt_used, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![document_id, section.name, section.content, section.prompt, now],
        )?;
        Ok(())
    }
}

impl PromptStore for Database {
    fn get(&self, key: &str) -> Option<String> {
        match self.get_setting(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to read prompt override, using default");
                None
            }
        }
    }
}
