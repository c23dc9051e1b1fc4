//! gRPC binding of the blog service.
//! - `proto`: generated messages, client and server stubs for `blog.BlogService`.
//! - `handler`: maps each RPC onto `service::blog::BlogService`.
//! - `errors`: `ServiceError` to `tonic::Status` mapping.
//! - `startup`: wires storage, health, reflection and tracing into a tonic server.

pub mod proto {
    #![allow(clippy::derive_partial_eq_without_eq)]
    tonic::include_proto!("blog");

    /// Encoded descriptors for server reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("blog_descriptor");
}

pub mod errors;
pub mod handler;
pub mod startup;

pub use startup::{run, serve};
