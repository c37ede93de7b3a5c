//! Tables Domain
//!
//! Read-only introspection of the connected MySQL schema: table listing,
//! column metadata, row counts and paginated rows.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /tables, /tables/data, /table/{name}, /table/{name}/data, /info
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← name validation, existence check, page arithmetic
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MySQL implementation (raw statements)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← TableName, ColumnInfo, response shapes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_tables::{handlers, MySqlTableRepository, TableService};
//!
//! let service = TableService::new(MySqlTableRepository::new(db));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mysql;
pub mod repository;
pub mod service;

pub use error::{TableError, TableResult};
pub use handlers::ApiDoc;
pub use models::{
    ColumnInfo, ColumnKey, DatabaseInfo, Row, TableName, TableOverview, TablePage, TableRecords,
    TableSample, TableStatus, TablesOverview, TablesSample,
};
pub use mysql::MySqlTableRepository;
#[cfg(any(test, feature = "mock"))]
pub use repository::MockTableRepository;
pub use repository::TableRepository;
pub use service::{DEFAULT_PAGE_LIMIT, DEFAULT_SAMPLE_LIMIT, TableService};
