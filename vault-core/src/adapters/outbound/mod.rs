pub mod crypto;
pub mod media;
pub mod sqlite;
pub mod storage;
