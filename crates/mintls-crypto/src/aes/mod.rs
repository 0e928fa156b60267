//! AES block engine with hardware acceleration.
//!
//! Provides AES-128, AES-192, and AES-256 single-block operations behind a
//! runtime-dispatched backend: x86-64 AES-NI intrinsics when the CPU has
//! them, an S-box table implementation otherwise. For modes of operation
//! (ECB, CBC) see the [`modes`](crate::modes) module.

#[cfg(target_arch = "x86_64")]
mod aes_ni;
mod soft;

use mintls_types::CryptoError;

/// AES block size in bytes (128 bits).
pub const AES_BLOCK_SIZE: usize = 16;

#[derive(Clone)]
enum Backend {
    #[cfg(target_arch = "x86_64")]
    Ni(aes_ni::NiAesKey),
    Soft(soft::SoftAesKey),
}

/// An AES key with precomputed round keys, zeroized on drop.
///
/// Accepts 16, 24, or 32-byte keys for AES-128, AES-192, and AES-256.
#[derive(Clone)]
pub struct AesKey {
    backend: Backend,
}

impl AesKey {
    /// Create a new AES key from raw bytes, picking the fastest available
    /// backend.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        #[cfg(target_arch = "x86_64")]
        if aesni_supported() {
            return Ok(Self {
                backend: Backend::Ni(aes_ni::NiAesKey::new(key)?),
            });
        }

        Ok(Self {
            backend: Backend::Soft(soft::SoftAesKey::new(key)?),
        })
    }

    /// Create a key pinned to the software backend.
    #[cfg(test)]
    pub(crate) fn new_soft(key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            backend: Backend::Soft(soft::SoftAesKey::new(key)?),
        })
    }

    /// Encrypt a single 16-byte block in place.
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        match &self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(k) => k.encrypt_block(block),
            Backend::Soft(k) => k.encrypt_block(block),
        }
    }

    /// Decrypt a single 16-byte block in place.
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        match &self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(k) => k.decrypt_block(block),
            Backend::Soft(k) => k.decrypt_block(block),
        }
    }

    /// Decrypt a run of whole blocks in place. The AES-NI backend works on
    /// four blocks at a time to exploit instruction pipelining.
    pub fn decrypt_blocks(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        if data.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::InvalidArg);
        }
        match &self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(k) => {
                k.decrypt_blocks(data);
                Ok(())
            }
            Backend::Soft(k) => {
                for chunk in data.chunks_exact_mut(AES_BLOCK_SIZE) {
                    k.decrypt_block(chunk)?;
                }
                Ok(())
            }
        }
    }

    /// Return the key length in bytes.
    pub fn key_len(&self) -> usize {
        match &self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(k) => k.key_len(),
            Backend::Soft(k) => k.key_len(),
        }
    }
}

/// Whether the CPU supports the AES instruction set.
///
/// The probe runs once per process and is memoized in a `OnceLock`.
pub fn aesni_supported() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        use std::sync::OnceLock;
        static AESNI: OnceLock<bool> = OnceLock::new();
        *AESNI.get_or_init(|| is_x86_feature_detected!("aes"))
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}
