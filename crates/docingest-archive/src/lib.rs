//! Archive enumeration with legacy filename repair and path sanitization.
//!
//! # Architecture
//!
//! - `format.rs` - Container kinds, extensions, tar codecs
//! - `source/` - Per-format entry enumeration
//! - `entry.rs` - One record with its unread content
//! - `names.rs` - CP866/CP437 name repair and file-name sanitization
//! - `sanitize.rs` - Entry path resolution (zip-slip prevention)

pub use entry::{ArchiveEntry, EntryKind};
pub use error::{Error, Result};
pub use format::{ArchiveKind, TarCompress, extension_of, is_tar_header, stem_of};
pub use names::{decode_name, sanitize_name, sanitize_relative_path};
pub use sanitize::{SanitizedPath, sanitize_entry_path};
pub use source::{Archive, EntrySource};

pub mod entry;
mod error;
mod format;
mod names;
mod sanitize;
pub mod source;
