//! Storage backends for the service layer
//!
//! Contains the in-memory blog store used for local runs and as the
//! substitute store in tests.

pub mod memory_blog_store;

pub use memory_blog_store::MemoryBlogStore;
