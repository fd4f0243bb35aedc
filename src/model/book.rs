#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,

    /// Not checked against `authors`; may dangle after the author is deleted.
    pub author_id: Option<i64>,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>, author_id: Option<i64>) -> Self {
        Self {
            id,
            title: title.into(),
            author_id,
        }
    }
}

/// A book with the name of the author it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub book: Book,
    pub author_name: String,
}
