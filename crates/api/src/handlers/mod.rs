pub mod attribute;
pub mod product;
pub mod sku;
pub mod sku_draft;
