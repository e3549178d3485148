//! A sandboxed storage engine for uploaded files.
//!
//! It provides a secure abstraction over the filesystem with built-in protections
//! against common I/O pitfalls and security vulnerabilities.
//!
//! # Core Features
//!
//! - **Sandbox Security**: Strict path traversal protection using physical path canonicalization.
//! - **Atomic Writes**: Uses an "atomic swap" pattern (unique temp write + `fsync` + `rename`)
//!   to prevent partially-written files surfacing after a crash.
//! - **Self-Healing**: Automatically identifies and cleans up orphaned temporary files
//!   during initialization.
//!
//! # Examples
//!
//! ```rust
//! use camp_storage::{Storage, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("public");
//!     let storage = Storage::builder()
//!         .root(&root)
//!         .create(true)
//!         .connect()
//!         .await?;
//!
//!     storage.write("uploads/photo_abc123.jpg", b"\xff\xd8\xff").await?;
//!     let data = storage.read("uploads/photo_abc123.jpg").await?;
//!     assert_eq!(data, b"\xff\xd8\xff");
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod security;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
