//! Filesystem primitives for the ingestion pipeline.
//!
//! - `scratch.rs` - per-expansion scratch directories, removed on every exit path
//! - `write.rs` - atomic file replacement for output artifacts

mod error;
mod scratch;
mod write;

pub use error::{Error, Result};
pub use scratch::ScratchSpace;
pub use write::{atomic_write, ensure_dir};
