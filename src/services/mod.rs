// Service exports
pub mod loader;
pub mod matching;
pub mod memory;
pub mod postgres;
pub mod store;

pub use loader::{load_requirements, load_roster};
pub use matching::{match_project_to_personnel, MatchError};
pub use memory::InMemoryStore;
pub use postgres::PostgresClient;
pub use store::{DataStore, RecordStore, StoreError};
