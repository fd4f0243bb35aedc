use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use super::types::{Author, Book, to_id};
use crate::error::Result;
use crate::model;
use crate::storage::Store;

pub type ShelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: Store) -> ShelfSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

pub(super) fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Store> {
    ctx.data::<Store>()
}

/// Turns a store failure into an error on the field being resolved.
pub(super) trait FieldResultExt<T> {
    fn in_field(self, field: &'static str) -> async_graphql::Result<T>;
}

impl<T> FieldResultExt<T> for Result<T> {
    fn in_field(self, field: &'static str) -> async_graphql::Result<T> {
        self.map_err(|err| {
            tracing::warn!(field, error = %err, "Field resolution failed");
            err.into()
        })
    }
}

/// Row id named by a GraphQL `ID`, or `None` when it cannot name any row.
pub(super) fn parse_id(id: &ID) -> Option<i64> {
    let parsed = id.parse::<i64>().ok();
    if parsed.is_none() {
        tracing::debug!(id = %id.as_str(), "Id matches no row");
    }
    parsed
}

/// Row ids to filter a listing by.
///
/// `None` lists everything: the argument was absent or empty. Null and
/// non-integer entries match nothing, so `Some` may hold an empty list.
fn id_filter(ids: Option<Vec<Option<ID>>>) -> Option<Vec<i64>> {
    let ids = ids.filter(|ids| !ids.is_empty())?;
    Some(ids.iter().flatten().filter_map(parse_id).collect())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List books with their author's name, optionally restricted to the given ids
    async fn books(
        &self,
        ctx: &Context<'_>,
        book_ids: Option<Vec<Option<ID>>>,
    ) -> async_graphql::Result<Option<Vec<Book>>> {
        let ids = match id_filter(book_ids) {
            Some(ids) if ids.is_empty() => return Ok(Some(Vec::new())),
            filter => filter.unwrap_or_default(),
        };
        let books = store(ctx)?.list_books(&ids).await.in_field("books")?;
        Ok(Some(books.into_iter().map(Book::from).collect()))
    }

    /// List authors with their books, optionally restricted to the given ids
    async fn authors(
        &self,
        ctx: &Context<'_>,
        author_ids: Option<Vec<Option<ID>>>,
    ) -> async_graphql::Result<Option<Vec<Author>>> {
        let ids = match id_filter(author_ids) {
            Some(ids) if ids.is_empty() => return Ok(Some(Vec::new())),
            filter => filter.unwrap_or_default(),
        };
        let authors = store(ctx)?
            .list_authors(&ids)
            .await
            .in_field("authors")?;
        Ok(Some(authors.into_iter().map(Author::from).collect()))
    }

    /// Get a single book by ID
    async fn book(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Book>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let book = store(ctx)?.book(id).await.in_field("book")?;
        Ok(book.map(Book::from))
    }

    /// Get a single author by ID
    async fn author(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Author>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let author = store(ctx)?.author(id).await.in_field("author")?;
        Ok(author.map(Author::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new author
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<Option<Author>> {
        let author = store(ctx)?
            .create_author(&name)
            .await
            .in_field("addAuthor")?;
        Ok(Some(author.into()))
    }

    /// Create a new book. The author is not required to exist.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author_id: Option<ID>,
    ) -> async_graphql::Result<Option<Book>> {
        let author_key = author_id.as_ref().and_then(parse_id);
        let book = store(ctx)?
            .create_book(&title, author_key)
            .await
            .in_field("addBook")?;
        Ok(Some(Book::echo(to_id(book.id), book.title, author_id)))
    }

    /// Replace a book's title and author, returning the values given
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
        author_id: Option<ID>,
    ) -> async_graphql::Result<Option<Book>> {
        if let Some(key) = parse_id(&id) {
            let author_key = author_id.as_ref().and_then(parse_id);
            store(ctx)?
                .update_book(model::Book::new(key, title.clone(), author_key))
                .await
                .in_field("updateBook")?;
        }
        Ok(Some(Book::echo(id, title, author_id)))
    }

    /// Replace an author's name, returning the values given
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
    ) -> async_graphql::Result<Option<Author>> {
        if let Some(key) = parse_id(&id) {
            store(ctx)?
                .update_author(model::Author::new(key, name.clone()))
                .await
                .in_field("updateAuthor")?;
        }
        Ok(Some(Author::echo(id, name)))
    }

    /// Delete a book, returning it as it was. Null if it did not exist.
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Book>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let book = store(ctx)?.delete_book(id).await.in_field("deleteBook")?;
        Ok(book.map(Book::from))
    }

    /// Delete an author, returning it as it was. Null if it did not exist.
    ///
    /// Books that reference the author are kept.
    async fn delete_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<Author>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let author = store(ctx)?
            .delete_author(id)
            .await
            .in_field("deleteAuthor")?;
        Ok(author.map(Author::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    async fn execute(schema: &ShelfSchema, query: &str) -> Value {
        serde_json::to_value(schema.execute(query).await).unwrap()
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(&ID::from("42")), Some(42));
        assert_eq!(parse_id(&ID::from("abc")), None);
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(id_filter(None), None);
        assert_eq!(id_filter(Some(Vec::new())), None);
        assert_eq!(
            id_filter(Some(vec![Some(ID::from("1")), None, Some(ID::from("x"))])),
            Some(vec![1])
        );
        assert_eq!(id_filter(Some(vec![None])), Some(Vec::new()));
    }

    #[test]
    fn test_sdl_declares_fields() {
        let schema = build_schema(Store::open_in_memory().unwrap());
        let sdl = schema.sdl();
        assert!(sdl.contains("type Author"));
        assert!(sdl.contains("bookIds: [ID]"));
        assert!(sdl.contains("authorIds: [ID]"));
        assert!(sdl.contains("deleteAuthor"));
        assert!(sdl.contains("authorName: String"));
    }

    #[tokio::test]
    async fn test_store_failure_fails_only_its_mutation() {
        let store = Store::open_in_memory().unwrap();
        store
            .call(|conn| conn.execute_batch("DROP TABLE books"))
            .await
            .unwrap();
        let schema = build_schema(store);

        let response = execute(
            &schema,
            r#"mutation {
                addAuthor(name: "Mary Shelley") { id }
                addBook(title: "Frankenstein", authorId: "1") { id }
            }"#,
        )
        .await;

        assert_eq!(
            response["data"],
            json!({ "addAuthor": { "id": "1" }, "addBook": null })
        );
        let errors = response["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["path"], json!(["addBook"]));
        assert!(
            errors[0]["message"]
                .as_str()
                .unwrap()
                .contains("no such table: books")
        );
    }

    #[tokio::test]
    async fn test_store_failure_fails_only_its_query() {
        let store = Store::open_in_memory().unwrap();
        store.seed(2).await.unwrap();
        store
            .call(|conn| conn.execute_batch("DROP TABLE books"))
            .await
            .unwrap();
        let schema = build_schema(store);

        let response = execute(
            &schema,
            r#"{ book(id: "1") { title } author(id: "2") { name } }"#,
        )
        .await;

        assert_eq!(
            response["data"],
            json!({ "book": null, "author": { "name": "Author 2" } })
        );
        assert_eq!(response["errors"][0]["path"], json!(["book"]));
    }
}
