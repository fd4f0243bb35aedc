use super::store::{Store, placeholders};
use crate::error::Result;
use crate::model::{Book, BookEntry};
use rusqlite::{OptionalExtension, Row, params, params_from_iter};

const LIST_BOOKS: &str = "SELECT books.id, books.title, books.authorId, authors.name \
     FROM books INNER JOIN authors ON books.authorId = authors.id";

impl Store {
    pub async fn book(&self, id: i64) -> Result<Option<Book>> {
        tracing::debug!(id, "Fetching book");
        self.call(move |conn| {
            conn.query_row(
                "SELECT id, title, authorId FROM books WHERE id = ?1",
                params![id],
                row_to_book,
            )
            .optional()
        })
        .await
    }

    /// Every book whose `authorId` is `author_id`.
    pub async fn books_by_author(&self, author_id: i64) -> Result<Vec<Book>> {
        tracing::debug!(author_id, "Fetching books by author");
        self.call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, title, authorId FROM books WHERE authorId = ?1")?;
            let books = stmt
                .query_map(params![author_id], row_to_book)?
                .collect::<rusqlite::Result<Vec<_>>>();
            books
        })
        .await
    }

    /// Books joined with their author's name, restricted to `ids` unless it
    /// is empty.
    ///
    /// Books without a matching author row are left out by the inner join.
    pub async fn list_books(&self, ids: &[i64]) -> Result<Vec<BookEntry>> {
        tracing::debug!(?ids, "Listing books");
        let ids = ids.to_vec();
        self.call(move |conn| {
            let sql = if ids.is_empty() {
                LIST_BOOKS.to_string()
            } else {
                format!("{LIST_BOOKS} WHERE books.id IN ({})", placeholders(ids.len()))
            };
            let mut stmt = conn.prepare(&sql)?;
            let entries = stmt
                .query_map(params_from_iter(ids.iter()), |row| {
                    Ok(BookEntry {
                        book: row_to_book(row)?,
                        author_name: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>();
            entries
        })
        .await
    }

    pub async fn create_book(&self, title: &str, author_id: Option<i64>) -> Result<Book> {
        let title = title.to_string();
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO books (title, authorId) VALUES (?1, ?2)",
                params![title, author_id],
            )?;
            let id = conn.last_insert_rowid();
            tracing::debug!(id, "Created book");
            Ok(Book::new(id, title, author_id))
        })
        .await
    }

    /// Overwrite title and author of book `book.id`.
    ///
    /// Returns `book` as given. A missing id updates nothing and still
    /// returns it; `author_id` is not checked against `authors`.
    pub async fn update_book(&self, book: Book) -> Result<Book> {
        self.call(move |conn| {
            let changed = conn.execute(
                "UPDATE books SET title = ?1, authorId = ?2 WHERE id = ?3",
                params![book.title, book.author_id, book.id],
            )?;
            if changed == 0 {
                tracing::debug!(id = book.id, "Update matched no book");
            }
            Ok(book)
        })
        .await
    }

    /// Delete a book, returning the row as it was before deletion.
    pub async fn delete_book(&self, id: i64) -> Result<Option<Book>> {
        self.call(move |conn| {
            let snapshot = conn
                .query_row(
                    "SELECT id, title, authorId FROM books WHERE id = ?1",
                    params![id],
                    row_to_book,
                )
                .optional()?;
            conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
            tracing::debug!(id, found = snapshot.is_some(), "Deleted book");
            Ok(snapshot)
        })
        .await
    }
}

fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author_id: row.get(2)?,
    })
}
