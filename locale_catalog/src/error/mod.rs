//! Error types produced while resolving, parsing and persisting catalogs.

mod constructors;
mod types;

pub use types::{CatalogError, CatalogResult};
