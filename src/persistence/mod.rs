pub mod files;
pub mod store;

pub use files::{atomic_write, ensure_agenda_dir, get_agenda_dir, read_file, snapshot_file};
pub use store::{
    decode_snapshot, encode_snapshot, FileStore, Snapshot, StatePort, StorageError, TaskRecord,
    SNAPSHOT_VERSION,
};

#[cfg(test)]
pub use store::MemoryStore;
