//! Process-level helpers shared by the blog server and client binaries.
//! - Tracing subscriber setup (compact or JSON).
//! - Shutdown signal future for graceful stop.

pub mod signal;
pub mod utils;
