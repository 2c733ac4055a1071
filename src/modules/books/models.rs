use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A free-form JSON scalar (string, number or boolean), stored as received.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Scalar(Value);

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(_) | Value::Object(_) => Err(serde::de::Error::custom(
                "expected a string, number or boolean",
            )),
            value => Ok(Self(value)),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

/// Treats an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored book record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-generated identifier, immutable after creation
    pub id: String,
    pub name: String,
    pub year: Option<Scalar>,
    pub author: Option<Scalar>,
    pub summary: Option<Scalar>,
    pub publisher: Option<Scalar>,
    pub page_count: u32,
    pub read_page: u32,
    /// `read_page == page_count`, recomputed on every write
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record from an already validated payload.
    pub(crate) fn create(
        id: String,
        name: String,
        payload: BookPayload,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.read_page == payload.page_count,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field; `id` and `inserted_at` are left alone.
    pub(crate) fn apply(&mut self, name: String, payload: BookPayload, now: OffsetDateTime) {
        self.name = name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.finished = payload.read_page == payload.page_count;
        self.reading = payload.reading;
        self.updated_at = now;
    }
}

/// Request body for creating or replacing a book.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<Scalar>,
    pub author: Option<Scalar>,
    pub summary: Option<Scalar>,
    pub publisher: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading: bool,
}

/// The `{id, name, publisher}` projection returned by the list route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<Scalar>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}
