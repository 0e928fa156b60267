//! GCD and modular inverse operations.

use crate::bignum::BigNum;
use mintls_types::CryptoError;

impl BigNum {
    /// Compute the greatest common divisor of self and other.
    pub fn gcd(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        if self.is_zero() && other.is_zero() {
            return Err(CryptoError::InvalidArg);
        }
        if self.is_zero() {
            let mut r = other.clone();
            r.set_negative(false);
            return Ok(r);
        }
        if other.is_zero() {
            let mut r = self.clone();
            r.set_negative(false);
            return Ok(r);
        }

        // Work with absolute values
        let mut a = self.clone();
        a.set_negative(false);
        let mut b = other.clone();
        b.set_negative(false);

        if a < b {
            std::mem::swap(&mut a, &mut b);
        }

        // Euclidean algorithm: repeatedly compute a mod b
        loop {
            let (_, rem) = a.div_rem(&b)?;
            if rem.is_zero() {
                return Ok(b);
            }
            a = b;
            b = rem;
        }
    }

    /// Compute the modular inverse: self^(-1) mod modulus.
    ///
    /// Returns `Err(BnNoInverse)` if gcd(self, modulus) != 1.
    pub fn mod_inv(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.is_zero() || modulus.is_one() {
            return Err(CryptoError::InvalidArg);
        }

        let one = BigNum::from_u64(1);
        let zero = BigNum::zero();

        // Extended Euclidean algorithm. We track old_r, r and the Bezout
        // coefficient old_s with old_r = old_s * self (mod modulus).
        let mut old_r = self.mod_reduce(modulus)?;
        if old_r.is_zero() {
            return Err(CryptoError::BnNoInverse);
        }
        let mut r = modulus.clone();

        let mut old_s = one;
        let mut s = zero;

        while !r.is_zero() {
            let (quotient, remainder) = old_r.div_rem(&r)?;
            old_r = r;
            r = remainder;

            // new_s = old_s - quotient * s
            let qs = quotient.mul(&s);
            let new_s = old_s.sub(&qs);
            old_s = s;
            s = new_s;
        }

        // old_r is the gcd; it must be 1 for an inverse to exist.
        if !old_r.is_one() {
            return Err(CryptoError::BnNoInverse);
        }

        if old_s.is_negative() {
            old_s = old_s.add(modulus);
        }
        old_s.mod_reduce(modulus)
    }
}
