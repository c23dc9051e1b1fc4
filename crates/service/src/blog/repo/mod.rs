pub mod mongo;

pub use mongo::MongoBlogRepository;
