// ============================================================================
// Persistence
// Defensive snapshot save/restore keyed by a caller-supplied identifier
// ============================================================================

mod snapshot;
mod store;

pub use snapshot::{PersistedSnapshot, SNAPSHOT_VERSION};
pub use store::{FileStore, MemoryStore, SnapshotStore};
