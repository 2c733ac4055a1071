pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

pub use repository::{BookError, BookRepository, InMemoryBookRepository};
pub use routes::SharedBookRepository;

/// Books module: in-memory book records served under `/books`
pub struct BooksModule {
    repository: SharedBookRepository,
}

impl BooksModule {
    pub fn new(repository: SharedBookRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let envelope = |data: serde_json::Value| {
            json!({
                "type": "object",
                "properties": {
                    "status": { "type": "string" },
                    "data": { "type": "object", "properties": data }
                }
            })
        };
        let summary_ref = json!({ "$ref": "#/components/schemas/BookSummary" });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        }]);
        let payload_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List book summaries",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book as {id, name, publisher}",
                                "content": {
                                    "application/json": {
                                        "schema": envelope(json!({
                                            "books": {
                                                "type": "array",
                                                "items": summary_ref
                                            }
                                        }))
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": payload_body.clone(),
                        "responses": {
                            "201": { "description": "Book added; data.bookId holds the new id" },
                            "400": error("Missing name, readPage > pageCount, or malformed JSON")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": {
                                "description": "The full record under data.book",
                                "content": {
                                    "application/json": {
                                        "schema": envelope(json!({
                                            "book": { "$ref": "#/components/schemas/Book" }
                                        }))
                                    }
                                }
                            },
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a book's fields",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "requestBody": payload_body,
                        "responses": {
                            "200": { "description": "Book updated" },
                            "400": error("Missing name, readPage > pageCount, or malformed JSON"),
                            "404": error("Id not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": { "description": "Book deleted" },
                            "404": error("Id not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Scalar": {
                        "description": "Free-form value stored as received",
                        "type": ["string", "number", "boolean", "null"]
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "year": { "$ref": "#/components/schemas/Scalar" },
                            "author": { "$ref": "#/components/schemas/Scalar" },
                            "summary": { "$ref": "#/components/schemas/Scalar" },
                            "publisher": { "$ref": "#/components/schemas/Scalar" },
                            "pageCount": { "type": "integer", "minimum": 0 },
                            "readPage": { "type": "integer", "minimum": 0 },
                            "finished": { "type": "boolean" },
                            "reading": { "type": "boolean" },
                            "insertedAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" }
                        },
                        "required": [
                            "id", "name", "pageCount", "readPage", "finished",
                            "reading", "insertedAt", "updatedAt"
                        ]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "minLength": 1 },
                            "year": { "$ref": "#/components/schemas/Scalar" },
                            "author": { "$ref": "#/components/schemas/Scalar" },
                            "summary": { "$ref": "#/components/schemas/Scalar" },
                            "publisher": { "$ref": "#/components/schemas/Scalar" },
                            "pageCount": { "type": ["integer", "null"], "minimum": 0 },
                            "readPage": { "type": ["integer", "null"], "minimum": 0 },
                            "reading": { "type": ["boolean", "null"] }
                        },
                        "required": ["name"]
                    },
                    "BookSummary": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "publisher": { "$ref": "#/components/schemas/Scalar" }
                        },
                        "required": ["id", "name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let discarded = self.repository.count().await;
        tracing::info!(
            module = self.name(),
            discarded,
            "books module stopped; in-memory records dropped"
        );
        Ok(())
    }
}

/// Create the books module around the given repository
pub fn create_module(repository: SharedBookRepository) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(repository))
}
