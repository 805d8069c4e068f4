//! SQLite-backed contact table.
//!
//! The database file is created when missing and the table is created on
//! open, so a fresh deployment needs no setup step. Schema:
//!
//! ```sql
//! contact_requests(id INTEGER PRIMARY KEY AUTOINCREMENT,
//!                  nome TEXT NOT NULL, email TEXT NOT NULL,
//!                  telefone TEXT NOT NULL, empresa TEXT)
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use contato_core::{ContactRequest, ContactStore, ListOrder, StoreResult};
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::{Error, Result, to_store_error};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS contact_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    email TEXT NOT NULL,
    telefone TEXT NOT NULL,
    empresa TEXT
)";

const INSERT: &str =
    "INSERT INTO contact_requests (nome, email, telefone, empresa) VALUES (?, ?, ?, ?)";

const SELECT_ASC: &str =
    "SELECT id, nome, email, telefone, empresa FROM contact_requests ORDER BY id ASC";

const SELECT_DESC: &str =
    "SELECT id, nome, email, telefone, empresa FROM contact_requests ORDER BY id DESC";

/// Pool size for file databases. SQLite still serializes writers.
const FILE_POOL_SIZE: u32 = 4;

#[derive(Debug, FromRow)]
struct ContactRow {
    id: i64,
    nome: String,
    email: String,
    telefone: String,
    empresa: Option<String>,
}

impl From<ContactRow> for ContactRequest {
    fn from(row: ContactRow) -> Self {
        ContactRequest {
            id: Some(row.id),
            nome: row.nome,
            email: row.email,
            telefone: row.telefone,
            empresa: row.empresa,
        }
    }
}

/// Relational-table store on a local SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (or creates) the database at `url` and ensures the table exists.
    ///
    /// Accepts any sqlx SQLite connection string, e.g. `sqlite://contatos.db`
    /// or `sqlite::memory:`. In-memory databases live on a single pinned
    /// connection so every request sees the same data.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|source| Error::InvalidUrl {
                url: url.to_string(),
                source,
            })?
            .create_if_missing(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE)
        };

        tracing::info!(url = %url, "Opening SQLite contact store");
        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("contact_requests table ready");
        Ok(())
    }

    /// Closes the pool, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl ContactStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn supports_listing(&self) -> bool {
        true
    }

    async fn append(&self, contact: ContactRequest) -> StoreResult<ContactRequest> {
        let result = sqlx::query(INSERT)
            .bind(&contact.nome)
            .bind(&contact.email)
            .bind(&contact.telefone)
            .bind(&contact.empresa)
            .execute(&self.pool)
            .await
            .map_err(|e| to_store_error("insert", e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, "Stored contact request");
        Ok(contact.with_id(id))
    }

    async fn list_all(&self, order: ListOrder) -> StoreResult<Vec<ContactRequest>> {
        let sql = match order {
            ListOrder::Ascending => SELECT_ASC,
            ListOrder::Descending => SELECT_DESC,
        };
        let rows: Vec<ContactRow> = sqlx::query_as(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| to_store_error("select", e))?;
        Ok(rows.into_iter().map(ContactRequest::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:contatos?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://contatos.db"));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let err = SqliteStore::connect("sqlite://contatos.db?mode=bogus")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_memory_database_keeps_rows_across_calls() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        store
            .append(ContactRequest::new("Ana", "ana@x.com", "1"))
            .await
            .unwrap();
        store
            .append(ContactRequest::new("Bia", "bia@y.com", "2"))
            .await
            .unwrap();
        let all = store.list_all(ListOrder::Ascending).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
