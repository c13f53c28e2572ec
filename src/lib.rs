//! Persisted domain-state core for a HoReCa job-board app: typed in-memory
//! collections (sessions, profiles, jobs, responses, portfolio, education,
//! events) mirrored whole-state to a local key/JSON backend. Single logical
//! writer, no server round-trips; every store is the system of record.

pub mod context;
pub mod ids;
pub mod models;
pub mod persist;
pub mod store;
pub mod stores;
pub mod views;

pub use context::AppContext;
pub use ids::{ClockIds, IdGenerator, SequentialIds};
pub use persist::{MemoryBackend, NullBackend, SqliteBackend, StorageBackend};
pub use store::Store;
