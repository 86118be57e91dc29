pub mod files;
pub mod snapshot;
pub mod store;

pub use files::{
    atomic_write, backup_file, ensure_dir, find_local_dayboard, get_dayboard_dir, init_local_dayboard,
    read_file, DAYBOARD_DIR_NAME,
};
pub use snapshot::Snapshot;
pub use store::{JsonFileStore, MemoryStore, Persist, STATE_FILE_NAME};
