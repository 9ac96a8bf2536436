//! Storage module for inspection images
//!
//! Provides a local disk store that writes uploads under a fixed directory
//! with collision-free, timestamp-prefixed filenames.

mod local_disk;

pub use local_disk::{LocalDiskStorage, StoredFile};
