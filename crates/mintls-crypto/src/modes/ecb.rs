//! ECB (Electronic Codebook) mode: a single raw block operation.

use mintls_types::CryptoError;

use crate::aes::{AesKey, AES_BLOCK_SIZE};
use crate::modes::CipherDir;

/// Process one 16-byte block. Input and output must both be exactly one
/// block long.
pub fn ecb_crypt(
    key: &AesKey,
    dir: CipherDir,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    if input.len() != AES_BLOCK_SIZE || output.len() != AES_BLOCK_SIZE {
        return Err(CryptoError::InvalidArg);
    }

    output.copy_from_slice(input);
    match dir {
        CipherDir::Encrypt => key.encrypt_block(output),
        CipherDir::Decrypt => key.decrypt_block(output),
    }
}
