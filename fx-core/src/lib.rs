pub mod calculations;
pub mod db;
pub mod models;
pub mod persistence;
pub mod session;
pub mod store;

pub use db::repository::{KeyValueRepository, RepositoryError};
pub use models::*;
pub use persistence::{STORAGE_KEY, TransferSnapshotStore};
pub use session::{Calculator, DepositCalculator, TransferSession, Update};
pub use store::{InputField, InputSnapshot, InputStore};
