use async_graphql::{Context, ID, Object};

use super::schema::{FieldResultExt, parse_id, store};
use crate::model;

pub(crate) fn to_id(id: i64) -> ID {
    ID(id.to_string())
}

/// Author as exposed over GraphQL.
///
/// `books` is preloaded when the author came from the `authors` listing and
/// fetched on demand otherwise.
pub struct Author {
    id: ID,
    name: String,
    books: Option<Vec<model::Book>>,
}

impl Author {
    /// An author carrying exactly the values a mutation was given.
    pub(crate) fn echo(id: ID, name: String) -> Self {
        Self {
            id,
            name,
            books: None,
        }
    }
}

impl From<model::Author> for Author {
    fn from(author: model::Author) -> Self {
        Self::echo(to_id(author.id), author.name)
    }
}

impl From<model::AuthorEntry> for Author {
    fn from(entry: model::AuthorEntry) -> Self {
        Self {
            books: Some(entry.books),
            ..Self::from(entry.author)
        }
    }
}

#[Object]
impl Author {
    async fn id(&self) -> &ID {
        &self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    /// Books that reference this author
    async fn books(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Book>>> {
        let books = match (&self.books, parse_id(&self.id)) {
            (Some(books), _) => books.clone(),
            (None, Some(author_id)) => store(ctx)?
                .books_by_author(author_id)
                .await
                .in_field("Author.books")?,
            (None, None) => Vec::new(),
        };
        Ok(Some(books.into_iter().map(Book::from).collect()))
    }
}

/// Book as exposed over GraphQL.
///
/// `authorName` is preloaded when the book came from the `books` listing.
pub struct Book {
    id: ID,
    title: String,
    author_id: Option<ID>,
    author_name: Option<String>,
}

impl Book {
    /// A book carrying exactly the values a mutation was given.
    pub(crate) fn echo(id: ID, title: String, author_id: Option<ID>) -> Self {
        Self {
            id,
            title,
            author_id,
            author_name: None,
        }
    }

    async fn load_author(
        &self,
        ctx: &Context<'_>,
        field: &'static str,
    ) -> async_graphql::Result<Option<model::Author>> {
        let Some(author_id) = self.author_id.as_ref().and_then(parse_id) else {
            return Ok(None);
        };
        let author = store(ctx)?.author(author_id).await.in_field(field)?;
        Ok(author)
    }
}

impl From<model::Book> for Book {
    fn from(book: model::Book) -> Self {
        Self::echo(to_id(book.id), book.title, book.author_id.map(to_id))
    }
}

impl From<model::BookEntry> for Book {
    fn from(entry: model::BookEntry) -> Self {
        Self {
            author_name: Some(entry.author_name),
            ..Self::from(entry.book)
        }
    }
}

#[Object]
impl Book {
    async fn id(&self) -> &ID {
        &self.id
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn author_id(&self) -> Option<&ID> {
        self.author_id.as_ref()
    }

    /// Name of the referenced author, null when the reference dangles
    async fn author_name(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<String>> {
        if let Some(name) = &self.author_name {
            return Ok(Some(name.clone()));
        }
        let author = self.load_author(ctx, "Book.authorName").await?;
        Ok(author.map(|a| a.name))
    }

    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Author>> {
        let author = self.load_author(ctx, "Book.author").await?;
        Ok(author.map(Author::from))
    }
}
