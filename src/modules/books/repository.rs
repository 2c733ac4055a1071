//! In-memory book storage.
//!
//! Records live in a single insertion-ordered `Vec`; every lookup is a linear
//! scan by id. The whole collection sits behind one `RwLock`, so each
//! operation is atomic with respect to the others.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookPayload, BookSummary};
use crate::utils;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("book name is missing")]
    MissingName,

    #[error("readPage ({read_page}) is greater than pageCount ({page_count})")]
    ReadPageExceedsPageCount { read_page: u32, page_count: u32 },

    #[error("book {0} not found")]
    NotFound(String),
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Validates and stores a new book, returning its generated id
    async fn insert(&self, payload: BookPayload) -> Result<String, BookError>;

    /// Retrieves the full record
    async fn get_by_id(&self, id: &str) -> Result<Book, BookError>;

    /// Lists `{id, name, publisher}` for every record in insertion order
    async fn list_summaries(&self) -> Vec<BookSummary>;

    /// Number of stored records
    async fn count(&self) -> usize;

    /// Replaces every mutable field of an existing record, returning the result
    async fn update_by_id(&self, id: &str, payload: BookPayload) -> Result<Book, BookError>;

    /// Removes a record
    async fn delete_by_id(&self, id: &str) -> Result<(), BookError>;
}

/// Checks the write invariants and hands back the owned, non-empty name.
fn validate(payload: &mut BookPayload) -> Result<String, BookError> {
    let name = match payload.name.take() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(BookError::MissingName),
    };

    if payload.read_page > payload.page_count {
        return Err(BookError::ReadPageExceedsPageCount {
            read_page: payload.read_page,
            page_count: payload.page_count,
        });
    }

    Ok(name)
}

#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, mut payload: BookPayload) -> Result<String, BookError> {
        let name = validate(&mut payload)?;
        let id = utils::new_record_id();
        let book = Book::create(id.clone(), name, payload, utils::now_utc());

        self.books.write().await.push(book);
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Book, BookError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    async fn list_summaries(&self) -> Vec<BookSummary> {
        self.books.read().await.iter().map(BookSummary::from).collect()
    }

    async fn count(&self) -> usize {
        self.books.read().await.len()
    }

    async fn update_by_id(&self, id: &str, mut payload: BookPayload) -> Result<Book, BookError> {
        let name = validate(&mut payload)?;

        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        book.apply(name, payload, utils::now_utc());
        Ok(book.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), BookError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        books.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::Scalar;
    use std::time::Duration;

    fn payload(name: &str, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            page_count,
            read_page,
            ..BookPayload::default()
        }
    }

    #[tokio::test]
    async fn insert_rejects_missing_or_empty_name() {
        let repository = InMemoryBookRepository::new();

        let absent = BookPayload::default();
        assert_eq!(repository.insert(absent).await, Err(BookError::MissingName));
        assert_eq!(
            repository.insert(payload("", 10, 1)).await,
            Err(BookError::MissingName)
        );
        assert!(repository.list_summaries().await.is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_read_page_beyond_page_count() {
        let repository = InMemoryBookRepository::new();

        let result = repository.insert(payload("A", 10, 11)).await;

        assert_eq!(
            result,
            Err(BookError::ReadPageExceedsPageCount {
                read_page: 11,
                page_count: 10,
            })
        );
    }

    #[tokio::test]
    async fn insert_derives_finished_and_stamps_timestamps() {
        let repository = InMemoryBookRepository::new();

        let done = repository.insert(payload("A", 10, 10)).await.unwrap();
        let halfway = repository.insert(payload("B", 10, 5)).await.unwrap();

        let done = repository.get_by_id(&done).await.unwrap();
        let halfway = repository.get_by_id(&halfway).await.unwrap();

        assert!(done.finished);
        assert!(!halfway.finished);
        assert_eq!(done.inserted_at, done.updated_at);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let repository = InMemoryBookRepository::new();

        assert_eq!(
            repository.get_by_id("missing").await,
            Err(BookError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn summaries_follow_insertion_order() {
        let repository = InMemoryBookRepository::new();
        let mut expected = Vec::new();

        for name in ["first", "second", "third"] {
            let mut book = payload(name, 1, 0);
            book.publisher = Some(Scalar::from(format!("{} press", name)));
            expected.push(repository.insert(book).await.unwrap());
        }

        let summaries = repository.list_summaries().await;
        let ids: Vec<_> = summaries.iter().map(|s| s.id.clone()).collect();

        assert_eq!(ids, expected);
        assert_eq!(summaries[1].name, "second");
        assert_eq!(
            summaries[1].publisher.as_ref().and_then(Scalar::as_str),
            Some("second press")
        );
    }

    #[tokio::test]
    async fn update_preserves_identity_and_refreshes_state() {
        let repository = InMemoryBookRepository::new();
        let id = repository.insert(payload("Draft", 10, 5)).await.unwrap();
        let before = repository.get_by_id(&id).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut replacement = payload("Final", 10, 10);
        replacement.author = Some(Scalar::from("Someone"));
        let after = repository.update_by_id(&id, replacement).await.unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert!(after.updated_at > before.updated_at);
        assert!(after.finished);
        assert_eq!(after.name, "Final");
        assert_eq!(after.author.as_ref().and_then(Scalar::as_str), Some("Someone"));
        assert_eq!(repository.get_by_id(&id).await.unwrap(), after);
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let repository = InMemoryBookRepository::new();

        assert_eq!(
            repository.update_by_id("missing", payload("", 1, 0)).await,
            Err(BookError::MissingName)
        );
        assert_eq!(
            repository.update_by_id("missing", payload("A", 1, 0)).await,
            Err(BookError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_untouched() {
        let repository = InMemoryBookRepository::new();
        let id = repository.insert(payload("Kept", 10, 2)).await.unwrap();
        let before = repository.get_by_id(&id).await.unwrap();

        let result = repository.update_by_id(&id, payload("Kept", 10, 20)).await;

        assert!(matches!(
            result,
            Err(BookError::ReadPageExceedsPageCount { .. })
        ));
        assert_eq!(repository.get_by_id(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let repository = InMemoryBookRepository::new();
        let keep = repository.insert(payload("keep", 1, 0)).await.unwrap();
        let gone = repository.insert(payload("gone", 1, 0)).await.unwrap();
        assert_eq!(repository.count().await, 2);

        repository.delete_by_id(&gone).await.unwrap();
        assert_eq!(repository.count().await, 1);

        assert_eq!(
            repository.get_by_id(&gone).await,
            Err(BookError::NotFound(gone.clone()))
        );
        assert_eq!(
            repository.delete_by_id(&gone).await,
            Err(BookError::NotFound(gone))
        );
        assert!(repository.get_by_id(&keep).await.is_ok());
    }
}
