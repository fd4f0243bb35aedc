use super::book::Book;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

impl Author {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An author together with every book that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntry {
    pub author: Author,
    pub books: Vec<Book>,
}
