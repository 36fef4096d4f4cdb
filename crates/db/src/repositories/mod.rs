//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that take part in a product submission accept any
//! [`sqlx::PgExecutor`] so they can run inside the submission transaction.

pub mod attribute_repo;
pub mod product_repo;
pub mod sku_repo;

pub use attribute_repo::AttributeRepo;
pub use product_repo::ProductRepo;
pub use sku_repo::SkuRepo;
