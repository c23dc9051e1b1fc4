//! Blog module: repository seam, streaming scan, and the business service.

pub mod repository;
pub mod repo;
pub mod scan;
pub mod service;

pub use repository::BlogRepository;
pub use scan::BlogScan;
pub use service::BlogService;
