//! Key-value persistence slots for the SoftoDev storefront.
//!
//! A [`Store`] holds named byte slots; [`Cache`] layers JSON serialization on
//! top. Three stores ship with the crate:
//!
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`FileStore`] keeping one JSON file per key in a directory
//! - `SpinStore` over Spin's Key-Value Store (wasm32 only)
//!
//! # Example
//!
//! ```rust,ignore
//! use softo_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::new("/tmp/softo"));
//!
//! // Store a value
//! cache.set("prefs", &prefs)?;
//!
//! // Retrieve a value
//! let prefs: Option<Prefs> = cache.get("prefs")?;
//!
//! // Delete a value
//! cache.delete("prefs")?;
//! ```

mod error;
mod file;
mod kv;

pub use error::CacheError;
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use kv::SpinStore;
pub use kv::{Cache, MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
