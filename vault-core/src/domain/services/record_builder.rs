use crate::domain::{
    models::{EncryptedUserRecord, PlainUser, SeedEntry},
    ports::outbound::Cipher,
    CryptoError,
};

/// Encrypts each field on its own. No validation happens here.
pub fn build_record<C>(user: &PlainUser, cipher: &C) -> Result<EncryptedUserRecord, CryptoError>
where
    C: Cipher + ?Sized,
{
    Ok(EncryptedUserRecord {
        name: cipher.encrypt(&user.name)?,
        email: cipher.encrypt(&user.email)?,
        password: cipher.encrypt(&user.password)?,
        avatar: cipher.encrypt(&user.avatar_base64)?,
    })
}

/// Inverse of [`build_record`].
pub fn open_record<C>(entry: &SeedEntry<'_>, cipher: &C) -> Result<PlainUser, CryptoError>
where
    C: Cipher + ?Sized,
{
    Ok(PlainUser {
        name: cipher.decrypt(entry.name)?,
        email: cipher.decrypt(entry.email)?,
        password: cipher.decrypt(entry.password)?,
        avatar_base64: cipher.decrypt(entry.avatar)?,
    })
}
