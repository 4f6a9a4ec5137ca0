mod avatar_processing;
mod blob_store;
mod cipher;
mod record_ledger;
mod user_repository;

pub use avatar_processing::*;
pub use blob_store::*;
pub use cipher::*;
pub use record_ledger::*;
pub use user_repository::*;
