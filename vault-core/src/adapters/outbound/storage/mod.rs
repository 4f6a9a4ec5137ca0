mod fs_blob_store;
mod jsonl_ledger;

pub use fs_blob_store::*;
pub use jsonl_ledger::*;
