use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, OsRng},
    AeadCore, Aes256Gcm, KeyInit,
};
use base64::prelude::*;

use crate::domain::{ports::outbound::Cipher, CryptoError};

const NONCE_LEN: usize = 12;

/// AES-256-GCM with a fresh random nonce per value.
///
/// Ciphertexts are written as `base64(ciphertext || tag):base64(nonce)`.
#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    /// `key_b64` is the standard base64 encoding of a 32 byte key.
    pub fn from_base64_key(key_b64: &str) -> Result<Self, CryptoError> {
        let key = BASE64_STANDARD
            .decode(key_b64.trim())
            .map_err(|_| CryptoError::InvalidKey)?;
        let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::InvalidKey)?;

        Ok(Self { cipher })
    }

    pub fn generate_key() -> String {
        BASE64_STANDARD.encode(Aes256Gcm::generate_key(OsRng))
    }
}

impl Cipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng); // 96-bits; unique per message
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let cipher_b64 = BASE64_STANDARD.encode(ciphertext);
        let nonce_b64 = BASE64_STANDARD.encode(nonce);
        Ok(format!("{cipher_b64}:{nonce_b64}"))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let (cipher_b64, nonce_b64) = ciphertext
            .split_once(':')
            .ok_or(CryptoError::MalformedCiphertext)?;
        let cipher_bytes = BASE64_STANDARD
            .decode(cipher_b64)
            .map_err(|_| CryptoError::MalformedCiphertext)?;
        let nonce_bytes = BASE64_STANDARD
            .decode(nonce_b64)
            .map_err(|_| CryptoError::MalformedCiphertext)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CryptoError::MalformedCiphertext);
        }

        let nonce = GenericArray::from_slice(&nonce_bytes);
        let decrypted = self
            .cipher
            .decrypt(nonce, cipher_bytes.as_ref())
            .map_err(|_| CryptoError::Decrypt)?;

        String::from_utf8(decrypted).map_err(|_| CryptoError::Decrypt)
    }
}
