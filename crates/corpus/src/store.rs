//! SQLite-backed passage store.
//!
//! One database file holds three tables: `passages` (ordinal id →
//! text, optional source), `vectors` (same ordinal id → little-endian
//! f32 embedding blob), and `meta` (embedding provider/model/dimensions
//! recorded at ingestion time). The answering core only reads; the
//! write API exists for the ingestion side and for tests.

use crate::types::{EmbeddingMeta, Passage};
use docqa_core::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Handle on the passage store.
pub struct PassageStore {
    conn: Connection,
}

impl PassageStore {
    /// Open an existing store for querying.
    ///
    /// A missing file or missing tables means ingestion has not run (or
    /// did not finish) and is fatal.
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Index(format!(
                "No passage index found at {:?}. Ingest documents first.",
                path
            )));
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Index(format!("Failed to open passage index: {}", e)))?;

        let store = Self { conn };
        for table in ["passages", "vectors", "meta"] {
            if !store.table_exists(table)? {
                return Err(AppError::Index(format!(
                    "Passage index at {:?} is incomplete (missing '{}' table). Re-ingest documents.",
                    path, table
                )));
            }
        }

        Ok(store)
    }

    /// Create a new store with an empty schema, for the ingestion side
    /// and for tests.
    pub fn create(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Index(format!("Failed to create index directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Index(format!("Failed to create passage index: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS passages (
                id INTEGER PRIMARY KEY,
                text TEXT NOT NULL,
                source TEXT
            );

            CREATE TABLE IF NOT EXISTS vectors (
                passage_id INTEGER PRIMARY KEY,
                embedding BLOB NOT NULL,
                FOREIGN KEY (passage_id) REFERENCES passages(id)
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Index(format!("Failed to create tables: {}", e)))?;

        tracing::debug!("Initialized passage store at {:?}", path);
        Ok(Self { conn })
    }

    fn table_exists(&self, name: &str) -> AppResult<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |row| row.get(0),
            )
            .map_err(|e| AppError::Index(format!("Failed to inspect schema: {}", e)))?;
        Ok(count > 0)
    }

    /// Insert a passage and its embedding.
    pub fn insert_passage(&self, passage: &Passage, embedding: &[f32]) -> AppResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO passages (id, text, source) VALUES (?1, ?2, ?3)",
                params![passage.id, passage.text, passage.source],
            )
            .map_err(|e| AppError::Index(format!("Failed to insert passage: {}", e)))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO vectors (passage_id, embedding) VALUES (?1, ?2)",
                params![passage.id, embedding_to_bytes(embedding)],
            )
            .map_err(|e| AppError::Index(format!("Failed to insert embedding: {}", e)))?;

        Ok(())
    }

    /// Fetch a passage by ordinal id. `None` when the id has no stored
    /// passage (index/store size mismatch — callers skip these).
    pub fn passage(&self, id: i64) -> AppResult<Option<Passage>> {
        self.conn
            .query_row(
                "SELECT id, text, source FROM passages WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Passage {
                        id: row.get(0)?,
                        text: row.get(1)?,
                        source: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| AppError::Index(format!("Failed to fetch passage {}: {}", id, e)))
    }

    /// Number of stored passages.
    pub fn passage_count(&self) -> AppResult<u32> {
        self.conn
            .query_row("SELECT COUNT(*) FROM passages", [], |row| {
                row.get::<_, i64>(0).map(|v| v as u32)
            })
            .map_err(|e| AppError::Index(format!("Failed to count passages: {}", e)))
    }

    /// Load every stored embedding as (passage id, vector).
    pub fn vectors(&self) -> AppResult<Vec<(i64, Vec<f32>)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT passage_id, embedding FROM vectors ORDER BY passage_id")
            .map_err(|e| AppError::Index(format!("Failed to prepare vector query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let bytes: Vec<u8> = row.get(1)?;
                Ok((id, bytes))
            })
            .map_err(|e| AppError::Index(format!("Failed to query vectors: {}", e)))?;

        let mut vectors = Vec::new();
        for row in rows {
            let (id, bytes) =
                row.map_err(|e| AppError::Index(format!("Failed to read vector row: {}", e)))?;
            vectors.push((id, bytes_to_embedding(&bytes)?));
        }

        Ok(vectors)
    }

    /// Read the embedding configuration recorded at ingestion time.
    pub fn embedding_meta(&self) -> AppResult<EmbeddingMeta> {
        let provider = self.meta_value("embedding_provider")?;
        let model = self.meta_value("embedding_model")?;
        let dimensions: usize = self
            .meta_value("embedding_dimensions")?
            .parse()
            .map_err(|_| {
                AppError::Index("Passage index has invalid embedding dimensions".to_string())
            })?;

        Ok(EmbeddingMeta {
            provider,
            model,
            dimensions,
        })
    }

    /// Record the embedding configuration (ingestion side).
    pub fn set_embedding_meta(&self, meta: &EmbeddingMeta) -> AppResult<()> {
        for (key, value) in [
            ("embedding_provider", meta.provider.clone()),
            ("embedding_model", meta.model.clone()),
            ("embedding_dimensions", meta.dimensions.to_string()),
        ] {
            self.conn
                .execute(
                    "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
                    params![key, value],
                )
                .map_err(|e| AppError::Index(format!("Failed to write meta '{}': {}", key, e)))?;
        }
        Ok(())
    }

    fn meta_value(&self, key: &str) -> AppResult<String> {
        self.conn
            .query_row(
                "SELECT value FROM meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Index(format!("Failed to read meta '{}': {}", key, e)))?
            .ok_or_else(|| {
                AppError::Index(format!(
                    "Passage index is incomplete (missing meta '{}'). Re-ingest documents.",
                    key
                ))
            })
    }
}

/// Serialize an embedding to little-endian bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Deserialize an embedding from stored bytes.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Index(
            "Stored embedding has invalid byte length".to_string(),
        ));
    }

    let mut embedding = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        embedding.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(embedding)
}
