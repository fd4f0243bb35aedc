use crate::config::IN_MEMORY;
use crate::error::Result;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Number of demo authors and books written by [`Store::seed`] by default.
pub const DEFAULT_SEED_COUNT: u32 = 10;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        authorId INTEGER REFERENCES authors(id)
    );
"#;

/// Handle to the single SQLite connection of the process.
///
/// Cloning is cheap and every clone shares the same connection. Each
/// operation locks the connection on tokio's blocking pool, so writes are
/// serialized and async callers never block the runtime.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database at `path`. `:memory:` opens a private
    /// in-memory database.
    pub fn open(path: &Path) -> Result<Self> {
        if path == Path::new(IN_MEMORY) {
            return Self::open_in_memory();
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::debug!("Opened database {}", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        tracing::debug!("Opened in-memory database");
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    pub(crate) async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&guard)
        })
        .await?;
        Ok(result?)
    }

    /// Drop both tables and recreate them empty.
    pub async fn reset(&self) -> Result<()> {
        self.call(|conn| {
            conn.execute_batch("DROP TABLE IF EXISTS books; DROP TABLE IF EXISTS authors;")?;
            conn.execute_batch(SCHEMA)
        })
        .await?;
        tracing::info!("Reset authors and books tables");
        Ok(())
    }

    /// Insert `Author N` and `Book N` for N in `1..=count`, each book written
    /// by the author inserted alongside it.
    pub async fn seed(&self, count: u32) -> Result<()> {
        self.call(move |conn| {
            let tx = conn.unchecked_transaction()?;
            {
                let mut insert_author = tx.prepare("INSERT INTO authors (name) VALUES (?1)")?;
                let mut insert_book =
                    tx.prepare("INSERT INTO books (title, authorId) VALUES (?1, ?2)")?;
                for n in 1..=count {
                    let author_id = insert_author.insert(params![format!("Author {n}")])?;
                    insert_book.execute(params![format!("Book {n}"), author_id])?;
                }
            }
            tx.commit()
        })
        .await?;
        tracing::info!("Seeded {} authors and books", count);
        Ok(())
    }
}

/// `?, ?, ?` for an `IN (...)` clause with `count` values.
pub(super) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
