//! Record store implementations

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::{GoalStore, RecordStore, TimeRange};
