pub mod factory;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;
mod store;

pub use factory::SqliteHistoryStoreFactory;
pub use store::SqliteHistoryStore;
