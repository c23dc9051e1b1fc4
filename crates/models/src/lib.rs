//! Blog record shapes: the domain view handed to callers and the persisted
//! document layout, plus the MongoDB connection helpers.

pub mod blog;
pub mod db;
pub mod errors;

pub use blog::{Blog, BlogFields, BlogId, BlogItem};
