//! Service layer providing the blog CRUD operations on top of models.
//! - Separates business rules (id parsing, not-found policy) from data access.
//! - `BlogRepository` is the storage seam; MongoDB and in-memory stores implement it.
//! - List results are exposed as a lazily polled `BlogScan`.

pub mod errors;
pub mod blog;
pub mod storage;
#[cfg(test)]
pub mod test_support;
