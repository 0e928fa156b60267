//! CBC (Cipher Block Chaining) mode of operation.
//!
//! The IV buffer is updated in place to the last ciphertext block, so
//! consecutive calls chain as if the data had been processed in one go.

use mintls_types::CryptoError;

use crate::aes::{AesKey, AES_BLOCK_SIZE};
use crate::modes::CipherDir;

/// Process a run of whole blocks in CBC mode.
///
/// `input` must be a multiple of 16 bytes, `output` the same length, and
/// `iv` exactly 16 bytes. Decryption decrypts all blocks first (letting the
/// AES-NI backend pipeline them) and applies the ciphertext feedback after.
pub fn cbc_crypt(
    key: &AesKey,
    dir: CipherDir,
    iv: &mut [u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    if iv.len() != AES_BLOCK_SIZE {
        return Err(CryptoError::InvalidIvLength);
    }
    if input.len() % AES_BLOCK_SIZE != 0 || output.len() != input.len() {
        return Err(CryptoError::InvalidArg);
    }
    if input.is_empty() {
        return Ok(());
    }

    match dir {
        CipherDir::Encrypt => {
            let mut feedback = [0u8; AES_BLOCK_SIZE];
            feedback.copy_from_slice(iv);

            for (ic, oc) in input
                .chunks_exact(AES_BLOCK_SIZE)
                .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
            {
                for j in 0..AES_BLOCK_SIZE {
                    oc[j] = ic[j] ^ feedback[j];
                }
                key.encrypt_block(oc)?;
                feedback.copy_from_slice(oc);
            }

            iv.copy_from_slice(&feedback);
        }
        CipherDir::Decrypt => {
            output.copy_from_slice(input);
            key.decrypt_blocks(output)?;

            for (i, oc) in output.chunks_exact_mut(AES_BLOCK_SIZE).enumerate() {
                let prev = if i == 0 {
                    &iv[..]
                } else {
                    &input[(i - 1) * AES_BLOCK_SIZE..i * AES_BLOCK_SIZE]
                };
                for j in 0..AES_BLOCK_SIZE {
                    oc[j] ^= prev[j];
                }
            }

            iv.copy_from_slice(&input[input.len() - AES_BLOCK_SIZE..]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn sp800_38a_key() -> AesKey {
        AesKey::new(&hex("2b7e151628aed2a6abf7158809cf4f3c")).unwrap()
    }

    fn sp800_38a_plaintext() -> Vec<u8> {
        hex("6bc1bee22e409f96e93d7e117393172a\
             ae2d8a571e03ac9c9eb76fac45af8e51\
             30c81c46a35ce411e5fbc1191a0a52ef\
             f69f2445df4f9b17ad2b417be66c3710")
    }

    fn sp800_38a_ciphertext() -> Vec<u8> {
        hex("7649abac8119b246cee98e9b12e9197d\
             5086cb9b507219ee95db113a917678b2\
             73bed6b8e3c1743b7116e69e22229516\
             3ff1caa1681fac09120eca307586e1a7")
    }

    /// NIST SP 800-38A F.2.1: CBC-AES128.Encrypt.
    #[test]
    fn cbc_aes128_encrypt_sp800_38a() {
        let key = sp800_38a_key();
        let pt = sp800_38a_plaintext();
        let mut iv = hex("000102030405060708090a0b0c0d0e0f");
        let mut ct = vec![0u8; pt.len()];

        cbc_crypt(&key, CipherDir::Encrypt, &mut iv, &pt, &mut ct).unwrap();
        assert_eq!(ct, sp800_38a_ciphertext());
        // IV is left at the last ciphertext block.
        assert_eq!(iv, ct[ct.len() - 16..]);
    }

    /// NIST SP 800-38A F.2.2: CBC-AES128.Decrypt.
    #[test]
    fn cbc_aes128_decrypt_sp800_38a() {
        let key = sp800_38a_key();
        let ct = sp800_38a_ciphertext();
        let mut iv = hex("000102030405060708090a0b0c0d0e0f");
        let mut pt = vec![0u8; ct.len()];

        cbc_crypt(&key, CipherDir::Decrypt, &mut iv, &ct, &mut pt).unwrap();
        assert_eq!(pt, sp800_38a_plaintext());
        assert_eq!(iv, ct[ct.len() - 16..]);
    }

    #[test]
    fn chained_calls_match_single_call() {
        let key = sp800_38a_key();
        let pt = sp800_38a_plaintext();

        let mut iv_once = hex("000102030405060708090a0b0c0d0e0f");
        let mut whole = vec![0u8; pt.len()];
        cbc_crypt(&key, CipherDir::Encrypt, &mut iv_once, &pt, &mut whole).unwrap();

        // Same data in two calls of two blocks each.
        let mut iv_split = hex("000102030405060708090a0b0c0d0e0f");
        let mut first = vec![0u8; 32];
        let mut second = vec![0u8; 32];
        cbc_crypt(&key, CipherDir::Encrypt, &mut iv_split, &pt[..32], &mut first).unwrap();
        cbc_crypt(&key, CipherDir::Encrypt, &mut iv_split, &pt[32..], &mut second).unwrap();

        assert_eq!(&whole[..32], &first[..]);
        assert_eq!(&whole[32..], &second[..]);
        assert_eq!(iv_once, iv_split);
    }

    #[test]
    fn roundtrip_with_tail_blocks() {
        // Seven blocks exercises the pipelined path plus its scalar tail.
        let key = AesKey::new(&[7u8; 32]).unwrap();
        let pt: Vec<u8> = (0u8..112).collect();

        let mut iv = [0x55u8; 16];
        let mut ct = vec![0u8; pt.len()];
        cbc_crypt(&key, CipherDir::Encrypt, &mut iv, &pt, &mut ct).unwrap();

        let mut iv = [0x55u8; 16];
        let mut back = vec![0u8; ct.len()];
        cbc_crypt(&key, CipherDir::Decrypt, &mut iv, &ct, &mut back).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let key = AesKey::new(&[0u8; 16]).unwrap();
        let mut iv = [9u8; 16];
        let snapshot = iv;
        cbc_crypt(&key, CipherDir::Encrypt, &mut iv, &[], &mut []).unwrap();
        assert_eq!(iv, snapshot);
    }

    #[test]
    fn bad_lengths_rejected() {
        let key = AesKey::new(&[0u8; 16]).unwrap();

        let mut short_iv = [0u8; 8];
        let mut out = [0u8; 16];
        assert!(matches!(
            cbc_crypt(&key, CipherDir::Encrypt, &mut short_iv, &[0u8; 16], &mut out),
            Err(CryptoError::InvalidIvLength)
        ));

        let mut iv = [0u8; 16];
        let mut ragged_out = [0u8; 24];
        assert!(cbc_crypt(&key, CipherDir::Encrypt, &mut iv, &[0u8; 24], &mut ragged_out).is_err());
    }
}
