//! Storage layer: user and secret models, the repository traits, and their
//! in-memory and PostgreSQL implementations.

pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;

pub use error::StoreError;
pub use models::{sort_by_recently_updated, NewUser, Secret, User, UserInfo, MAX_SECRET_LEN};
pub use repo::{SecretRepository, Store, StoreResult, UserRepository};
