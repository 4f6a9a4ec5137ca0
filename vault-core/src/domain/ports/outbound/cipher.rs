use crate::domain::CryptoError;

/// A reversible, confidentiality-preserving string transform.
///
/// Every call to `encrypt` stands alone: ciphertexts can be decrypted in any order and
/// carry no relation to each other.
pub trait Cipher: Send + Sync + 'static {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError>;

    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError>;
}
