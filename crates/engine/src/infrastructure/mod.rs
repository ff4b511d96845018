//! External dependency implementations (ports + adapters).

pub mod ports;
pub mod snapshot;

pub use ports::{InMemorySnapshotStore, SnapshotError, SnapshotStore};
pub use snapshot::{GameSnapshot, JsonFileStore};
