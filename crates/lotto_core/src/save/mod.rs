// Stats persistence: a single JSON entry in the host's key-value storage,
// rewritten after every play, upgraded from the pre-mode layout on load.

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;
pub mod store;

pub use error::SaveError;
pub use format::{decode, encode};
pub use manager::SaveManager;
pub use migration::{detect_shape, migrate, try_migrate, SchemaShape};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Storage key the host has always used for the stats record.
pub const STATS_KEY: &str = "powerballStats";
