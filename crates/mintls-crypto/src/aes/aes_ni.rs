//! Hardware-accelerated AES using x86-64 AES-NI intrinsics.
//!
//! Only compiled on `x86_64` targets (gated at the module declaration in
//! `mod.rs`) and only instantiated after [`super::aesni_supported`] reports
//! the instructions present. Key expansion stays in software (see
//! [`super::soft::expand_key`]); the round keys are stored as `[u8; 16]`
//! blocks so they load straight into `__m128i` registers.

use core::arch::x86_64::*;

use mintls_types::CryptoError;
use zeroize::Zeroize;

use super::soft::expand_key;
use super::AES_BLOCK_SIZE;

/// Convert round-key words (big-endian u32 groups of 4) into `[u8; 16]` blocks.
fn words_to_blocks(words: &[u32], nr: usize) -> Vec<[u8; 16]> {
    let mut blocks = Vec::with_capacity(nr + 1);
    for round in 0..=nr {
        let mut blk = [0u8; 16];
        for col in 0..4 {
            let bytes = words[round * 4 + col].to_be_bytes();
            blk[col * 4..col * 4 + 4].copy_from_slice(&bytes);
        }
        blocks.push(blk);
    }
    blocks
}

/// Load a 128-bit round key into an `__m128i` register.
#[inline(always)]
unsafe fn load_key(key: &[u8; 16]) -> __m128i {
    _mm_loadu_si128(key.as_ptr() as *const __m128i)
}

/// Store a 128-bit register back into a `[u8; 16]` array.
#[inline(always)]
unsafe fn store_block(reg: __m128i, out: &mut [u8; 16]) {
    _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, reg);
}

/// Derive the equivalent inverse cipher round keys from the encryption
/// round keys:
///
/// ```text
/// dec_keys[0]      = enc_keys[rounds]
/// dec_keys[i]      = InvMixColumns(enc_keys[rounds - i])  for i in 1..rounds
/// dec_keys[rounds] = enc_keys[0]
/// ```
#[target_feature(enable = "aes")]
unsafe fn prepare_dec_keys(enc_keys: &[[u8; 16]], rounds: usize) -> Vec<[u8; 16]> {
    let mut dec = vec![[0u8; 16]; rounds + 1];

    dec[0] = enc_keys[rounds];

    for i in 1..rounds {
        let ek = load_key(&enc_keys[rounds - i]);
        let dk = _mm_aesimc_si128(ek);
        store_block(dk, &mut dec[i]);
    }

    dec[rounds] = enc_keys[0];

    dec
}

/// Encrypt a single 16-byte block in place.
#[target_feature(enable = "aes")]
unsafe fn encrypt_block_ni(block: &mut [u8; 16], enc_keys: &[[u8; 16]], rounds: usize) {
    let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);

    state = _mm_xor_si128(state, load_key(&enc_keys[0]));
    for r in 1..rounds {
        state = _mm_aesenc_si128(state, load_key(&enc_keys[r]));
    }
    state = _mm_aesenclast_si128(state, load_key(&enc_keys[rounds]));

    store_block(state, block);
}

/// Decrypt a single 16-byte block in place.
#[target_feature(enable = "aes")]
unsafe fn decrypt_block_ni(block: &mut [u8; 16], dec_keys: &[[u8; 16]], rounds: usize) {
    let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);

    state = _mm_xor_si128(state, load_key(&dec_keys[0]));
    for r in 1..rounds {
        state = _mm_aesdec_si128(state, load_key(&dec_keys[r]));
    }
    state = _mm_aesdeclast_si128(state, load_key(&dec_keys[rounds]));

    store_block(state, block);
}

/// Decrypt a run of whole blocks, four at a time.
///
/// Interleaving four independent AESDEC chains keeps the execution units
/// busy; a scalar loop finishes the tail. `data.len()` must be a multiple
/// of 16 (checked by the caller).
#[target_feature(enable = "aes")]
unsafe fn decrypt_blocks_ni(data: &mut [u8], dec_keys: &[[u8; 16]], rounds: usize) {
    let blocks = data.len() / AES_BLOCK_SIZE;
    let ptr = data.as_mut_ptr() as *mut __m128i;
    let mut i = 0;

    while i + 4 <= blocks {
        let mut b0 = _mm_loadu_si128(ptr.add(i));
        let mut b1 = _mm_loadu_si128(ptr.add(i + 1));
        let mut b2 = _mm_loadu_si128(ptr.add(i + 2));
        let mut b3 = _mm_loadu_si128(ptr.add(i + 3));

        let rk = load_key(&dec_keys[0]);
        b0 = _mm_xor_si128(b0, rk);
        b1 = _mm_xor_si128(b1, rk);
        b2 = _mm_xor_si128(b2, rk);
        b3 = _mm_xor_si128(b3, rk);

        for r in 1..rounds {
            let rk = load_key(&dec_keys[r]);
            b0 = _mm_aesdec_si128(b0, rk);
            b1 = _mm_aesdec_si128(b1, rk);
            b2 = _mm_aesdec_si128(b2, rk);
            b3 = _mm_aesdec_si128(b3, rk);
        }

        let rk = load_key(&dec_keys[rounds]);
        b0 = _mm_aesdeclast_si128(b0, rk);
        b1 = _mm_aesdeclast_si128(b1, rk);
        b2 = _mm_aesdeclast_si128(b2, rk);
        b3 = _mm_aesdeclast_si128(b3, rk);

        _mm_storeu_si128(ptr.add(i), b0);
        _mm_storeu_si128(ptr.add(i + 1), b1);
        _mm_storeu_si128(ptr.add(i + 2), b2);
        _mm_storeu_si128(ptr.add(i + 3), b3);

        i += 4;
    }

    while i < blocks {
        let start = i * AES_BLOCK_SIZE;
        let blk: &mut [u8; 16] = (&mut data[start..start + AES_BLOCK_SIZE])
            .try_into()
            .unwrap();
        decrypt_block_ni(blk, dec_keys, rounds);
        i += 1;
    }
}

/// AES key using AES-NI hardware acceleration.
#[derive(Clone)]
pub(crate) struct NiAesKey {
    enc_keys: Vec<[u8; 16]>,
    dec_keys: Vec<[u8; 16]>,
    rounds: usize,
    key_len: usize,
}

impl Drop for NiAesKey {
    fn drop(&mut self) {
        for k in &mut self.enc_keys {
            k.zeroize();
        }
        for k in &mut self.dec_keys {
            k.zeroize();
        }
    }
}

impl NiAesKey {
    /// Create a new AES-NI key from raw bytes (16, 24, or 32 bytes).
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let (words, nr) = expand_key(key)?;
        let enc_keys = words_to_blocks(&words, nr);

        // Safety: this constructor is only reached when aesni_supported()
        // has confirmed the AES instruction set.
        let dec_keys = unsafe { prepare_dec_keys(&enc_keys, nr) };

        Ok(Self {
            enc_keys,
            dec_keys,
            rounds: nr,
            key_len: key.len(),
        })
    }

    /// Encrypt a single 16-byte block in place.
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != AES_BLOCK_SIZE {
            return Err(CryptoError::InvalidArg);
        }

        let blk: &mut [u8; 16] = block.try_into().unwrap();
        // Safety: NiAesKey is only instantiated when AES-NI is available.
        unsafe {
            encrypt_block_ni(blk, &self.enc_keys, self.rounds);
        }
        Ok(())
    }

    /// Decrypt a single 16-byte block in place.
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != AES_BLOCK_SIZE {
            return Err(CryptoError::InvalidArg);
        }

        let blk: &mut [u8; 16] = block.try_into().unwrap();
        // Safety: NiAesKey is only instantiated when AES-NI is available.
        unsafe {
            decrypt_block_ni(blk, &self.dec_keys, self.rounds);
        }
        Ok(())
    }

    /// Decrypt whole blocks in place; length checked by the caller.
    pub fn decrypt_blocks(&self, data: &mut [u8]) {
        // Safety: NiAesKey is only instantiated when AES-NI is available.
        unsafe {
            decrypt_blocks_ni(data, &self.dec_keys, self.rounds);
        }
    }

    /// Return the key length in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }
}
