use super::store::{Store, placeholders};
use crate::error::Result;
use crate::model::{Author, AuthorEntry, Book};
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use std::collections::HashMap;

const LIST_AUTHORS: &str = "SELECT authors.id, authors.name, books.id, books.title \
     FROM authors LEFT JOIN books ON authors.id = books.authorId";

impl Store {
    pub async fn author(&self, id: i64) -> Result<Option<Author>> {
        tracing::debug!(id, "Fetching author");
        self.call(move |conn| {
            conn.query_row(
                "SELECT id, name FROM authors WHERE id = ?1",
                params![id],
                row_to_author,
            )
            .optional()
        })
        .await
    }

    /// Authors with their books, restricted to `ids` unless it is empty.
    ///
    /// Each author appears once, in the order the store returns them, and
    /// authors without books carry an empty list.
    pub async fn list_authors(&self, ids: &[i64]) -> Result<Vec<AuthorEntry>> {
        tracing::debug!(?ids, "Listing authors");
        let ids = ids.to_vec();
        self.call(move |conn| {
            let sql = if ids.is_empty() {
                LIST_AUTHORS.to_string()
            } else {
                format!("{LIST_AUTHORS} WHERE authors.id IN ({})", placeholders(ids.len()))
            };
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(ids.iter()), |row| {
                    let author = row_to_author(row)?;
                    let book_id: Option<i64> = row.get(2)?;
                    let title: Option<String> = row.get(3)?;
                    let book = book_id
                        .map(|id| Book::new(id, title.unwrap_or_default(), Some(author.id)));
                    Ok((author, book))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(group_by_author(rows))
        })
        .await
    }

    pub async fn create_author(&self, name: &str) -> Result<Author> {
        let name = name.to_string();
        self.call(move |conn| {
            conn.execute("INSERT INTO authors (name) VALUES (?1)", params![name])?;
            let id = conn.last_insert_rowid();
            tracing::debug!(id, "Created author");
            Ok(Author::new(id, name))
        })
        .await
    }

    /// Overwrite the name of author `author.id`, returning `author` as given
    /// whether or not the row exists.
    pub async fn update_author(&self, author: Author) -> Result<Author> {
        self.call(move |conn| {
            let changed = conn.execute(
                "UPDATE authors SET name = ?1 WHERE id = ?2",
                params![author.name, author.id],
            )?;
            if changed == 0 {
                tracing::debug!(id = author.id, "Update matched no author");
            }
            Ok(author)
        })
        .await
    }

    /// Delete an author, returning the row as it was before deletion.
    ///
    /// Books written by the author keep their `authorId`.
    pub async fn delete_author(&self, id: i64) -> Result<Option<Author>> {
        self.call(move |conn| {
            let snapshot = conn
                .query_row(
                    "SELECT id, name FROM authors WHERE id = ?1",
                    params![id],
                    row_to_author,
                )
                .optional()?;
            conn.execute("DELETE FROM authors WHERE id = ?1", params![id])?;
            tracing::debug!(id, found = snapshot.is_some(), "Deleted author");
            Ok(snapshot)
        })
        .await
    }
}

fn row_to_author(row: &Row) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Fold left-join rows into one entry per author, keeping first-seen order.
fn group_by_author(rows: Vec<(Author, Option<Book>)>) -> Vec<AuthorEntry> {
    let mut entries: Vec<AuthorEntry> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for (author, book) in rows {
        let pos = *positions.entry(author.id).or_insert_with(|| {
            entries.push(AuthorEntry {
                author,
                books: Vec::new(),
            });
            entries.len() - 1
        });
        if let Some(book) = book {
            entries[pos].books.push(book);
        }
    }

    entries
}
