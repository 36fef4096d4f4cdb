//! Primitive aliases shared by every crate in the workspace.

/// Primary keys for attributes, SKUs and products (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
