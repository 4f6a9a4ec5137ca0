use crate::domain::{
    models::{EncryptedUserRecord, LedgerEntry},
    ArtifactError,
};

/// Append-only store of every record ever added, in insertion order.
pub trait RecordLedger {
    fn append(&self, records: &[EncryptedUserRecord]) -> Result<(), ArtifactError>;

    fn load(&self) -> Result<Vec<LedgerEntry>, ArtifactError>;
}
