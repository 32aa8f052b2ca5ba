// ── Persistent stores ──
//
// Key-value blob storage and the favorites collection built on it.

mod blob;
mod favorites;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use favorites::FavoritesStore;
