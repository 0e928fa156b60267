//! Basic arithmetic operations for BigNum.

use crate::bignum::{BigNum, DoubleLimb, Limb, LIMB_BITS};
use mintls_types::CryptoError;

impl BigNum {
    /// Add two BigNums: self + other.
    pub fn add(&self, other: &BigNum) -> BigNum {
        if self.is_negative() == other.is_negative() {
            let mut result = add_unsigned(self.limbs(), other.limbs());
            result.set_negative(self.is_negative());
            result
        } else if self.is_negative() {
            // (-a) + b = b - a
            sub_unsigned(other.limbs(), self.limbs())
        } else {
            // a + (-b) = a - b
            sub_unsigned(self.limbs(), other.limbs())
        }
    }

    /// Subtract: self - other.
    pub fn sub(&self, other: &BigNum) -> BigNum {
        if self.is_negative() != other.is_negative() {
            let mut result = add_unsigned(self.limbs(), other.limbs());
            result.set_negative(self.is_negative());
            result
        } else if self.is_negative() {
            // (-a) - (-b) = b - a
            sub_unsigned(other.limbs(), self.limbs())
        } else {
            sub_unsigned(self.limbs(), other.limbs())
        }
    }

    /// Add the magnitudes of self and other; the result is non-negative.
    pub fn add_abs(&self, other: &BigNum) -> BigNum {
        add_unsigned(self.limbs(), other.limbs())
    }

    /// Multiply: self * other.
    pub fn mul(&self, other: &BigNum) -> BigNum {
        let mut result = mul_unsigned(self.limbs(), other.limbs());
        result.set_negative(self.is_negative() != other.is_negative());
        result
    }

    /// Multiply by a small unsigned integer, preserving the sign.
    pub fn mul_u64(&self, k: u64) -> BigNum {
        if k == 0 || self.is_zero() {
            return BigNum::zero();
        }

        let mut limbs = vec![0u64; self.num_limbs() + 1];
        let mut carry: u64 = 0;
        for (i, &l) in self.limbs().iter().enumerate() {
            let prod = l as DoubleLimb * k as DoubleLimb + carry as DoubleLimb;
            limbs[i] = prod as Limb;
            carry = (prod >> LIMB_BITS) as u64;
        }
        limbs[self.num_limbs()] = carry;

        let mut result = BigNum::from_limbs(limbs);
        result.set_negative(self.is_negative());
        result
    }

    /// Division with remainder on the magnitudes: returns (quotient, remainder)
    /// with |self| = q * |divisor| + r and 0 <= r < |divisor|. The quotient
    /// carries the product of the signs, the remainder the sign of self.
    pub fn div_rem(&self, divisor: &BigNum) -> Result<(BigNum, BigNum), CryptoError> {
        if divisor.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }

        let (mut q, mut r) = div_rem_unsigned(self.limbs(), divisor.limbs());
        q.set_negative(self.is_negative() != divisor.is_negative());
        r.set_negative(self.is_negative());
        Ok((q, r))
    }

    /// Euclidean modular reduction: the result is in `[0, modulus)` for a
    /// positive modulus, for negative inputs included.
    pub fn mod_reduce(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }

        let (_, r) = div_rem_unsigned(self.limbs(), modulus.limbs());
        if self.is_negative() && !r.is_zero() {
            return Ok(modulus.sub(&r));
        }
        Ok(r)
    }

    /// Compare absolute values.
    pub fn cmp_abs(&self, other: &BigNum) -> std::cmp::Ordering {
        let a_bits = self.bit_len();
        let b_bits = other.bit_len();
        if a_bits != b_bits {
            return a_bits.cmp(&b_bits);
        }

        // Same bit length, compare limbs from most significant
        let max_limbs = self.num_limbs().max(other.num_limbs());
        for i in (0..max_limbs).rev() {
            let a = if i < self.num_limbs() {
                self.limbs()[i]
            } else {
                0
            };
            let b = if i < other.num_limbs() {
                other.limbs()[i]
            } else {
                0
            };
            if a != b {
                return a.cmp(&b);
            }
        }
        std::cmp::Ordering::Equal
    }
}

/// Add two unsigned limb arrays.
fn add_unsigned(a: &[Limb], b: &[Limb]) -> BigNum {
    let max_len = a.len().max(b.len());
    let mut limbs = vec![0u64; max_len + 1];
    let mut carry: u64 = 0;

    for (i, limb) in limbs.iter_mut().take(max_len).enumerate() {
        let av = if i < a.len() { a[i] } else { 0 };
        let bv = if i < b.len() { b[i] } else { 0 };
        let sum = av as DoubleLimb + bv as DoubleLimb + carry as DoubleLimb;
        *limb = sum as Limb;
        carry = (sum >> LIMB_BITS) as u64;
    }
    limbs[max_len] = carry;

    BigNum::from_limbs(limbs)
}

/// Subtract unsigned limb arrays; the sign of the result reflects which
/// magnitude was larger.
fn sub_unsigned(a: &[Limb], b: &[Limb]) -> BigNum {
    let mut cmp = std::cmp::Ordering::Equal;
    let max_len = a.len().max(b.len());
    for i in (0..max_len).rev() {
        let av = if i < a.len() { a[i] } else { 0 };
        let bv = if i < b.len() { b[i] } else { 0 };
        if av != bv {
            cmp = av.cmp(&bv);
            break;
        }
    }

    let (larger, smaller, negative) = match cmp {
        std::cmp::Ordering::Less => (b, a, true),
        std::cmp::Ordering::Equal => return BigNum::zero(),
        std::cmp::Ordering::Greater => (a, b, false),
    };

    let mut limbs = vec![0u64; larger.len()];
    let mut borrow: u64 = 0;

    for (i, limb) in limbs.iter_mut().enumerate() {
        let lv = larger[i];
        let sv = if i < smaller.len() { smaller[i] } else { 0 };
        let (diff, b1) = lv.overflowing_sub(sv);
        let (diff2, b2) = diff.overflowing_sub(borrow);
        *limb = diff2;
        borrow = (b1 as u64) + (b2 as u64);
    }

    let mut bn = BigNum::from_limbs(limbs);
    bn.set_negative(negative);
    bn
}

/// Multiply two unsigned limb arrays (schoolbook).
fn mul_unsigned(a: &[Limb], b: &[Limb]) -> BigNum {
    if a.iter().all(|&l| l == 0) || b.iter().all(|&l| l == 0) {
        return BigNum::zero();
    }

    let mut limbs = vec![0u64; a.len() + b.len()];

    for i in 0..a.len() {
        let mut carry: u64 = 0;
        for j in 0..b.len() {
            let prod = a[i] as DoubleLimb * b[j] as DoubleLimb
                + limbs[i + j] as DoubleLimb
                + carry as DoubleLimb;
            limbs[i + j] = prod as Limb;
            carry = (prod >> LIMB_BITS) as u64;
        }
        limbs[i + b.len()] = carry;
    }

    BigNum::from_limbs(limbs)
}

/// Binary long division on unsigned limb arrays.
fn div_rem_unsigned(a: &[Limb], b: &[Limb]) -> (BigNum, BigNum) {
    let a_bn = BigNum::from_limbs(a.to_vec());
    let b_bn = BigNum::from_limbs(b.to_vec());

    if a_bn.cmp_abs(&b_bn) == std::cmp::Ordering::Less {
        return (BigNum::zero(), a_bn);
    }

    let bits = a_bn.bit_len();
    let mut quotient = vec![0u64; (bits + LIMB_BITS - 1) / LIMB_BITS];
    let mut remainder = BigNum::zero();

    for i in (0..bits).rev() {
        // remainder = remainder * 2 + bit i of a
        remainder = remainder.shift_left(1);
        if a_bn.get_bit(i) == 1 {
            remainder = remainder.add(&BigNum::from_u64(1));
        }

        if remainder.cmp_abs(&b_bn) != std::cmp::Ordering::Less {
            remainder = remainder.sub(&b_bn);
            quotient[i / LIMB_BITS] |= 1u64 << (i % LIMB_BITS);
        }
    }

    (BigNum::from_limbs(quotient), remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let a = BigNum::from_u64(100);
        let b = BigNum::from_u64(200);
        assert_eq!(a.add(&b), BigNum::from_u64(300));
    }

    #[test]
    fn test_add_carry_across_limbs() {
        let a = BigNum::from_u64(u64::MAX);
        let b = BigNum::from_u64(1);
        let c = a.add(&b);
        assert_eq!(c.limbs(), &[0, 1]);
    }

    #[test]
    fn test_sub() {
        let a = BigNum::from_u64(300);
        let b = BigNum::from_u64(100);
        assert_eq!(a.sub(&b), BigNum::from_u64(200));
    }

    #[test]
    fn test_sub_goes_negative() {
        let a = BigNum::from_u64(100);
        let b = BigNum::from_u64(300);
        let c = a.sub(&b);
        assert!(c.is_negative());
        assert_eq!(c.cmp_abs(&BigNum::from_u64(200)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_signed_add_sub_identities() {
        let a = BigNum::read_string(10, "123456789012345678901234567890").unwrap();
        let b = BigNum::read_string(10, "-98765432109876543210").unwrap();
        // (a + b) - b == a
        assert_eq!(a.add(&b).sub(&b), a);
        // a + (-a) == 0
        let neg_a = BigNum::zero().sub(&a);
        assert!(a.add(&neg_a).is_zero());
    }

    #[test]
    fn test_mul() {
        let a = BigNum::from_u64(12345);
        let b = BigNum::from_u64(67890);
        assert_eq!(a.mul(&b), BigNum::from_u64(12345u64 * 67890));
    }

    #[test]
    fn test_mul_multi_limb() {
        // (2^64 + 1)^2 = 2^128 + 2^65 + ... check via string arithmetic
        let a = BigNum::read_string(16, "10000000000000001").unwrap();
        let c = a.mul(&a);
        let expected = BigNum::read_string(16, "100000000000000020000000000000001").unwrap();
        assert_eq!(c, expected);
    }

    #[test]
    fn test_mul_signs() {
        let a = BigNum::read_string(10, "-7").unwrap();
        let b = BigNum::from_u64(6);
        let c = a.mul(&b);
        assert!(c.is_negative());
        assert_eq!(c.cmp_abs(&BigNum::from_u64(42)), std::cmp::Ordering::Equal);
        assert!(!a.mul(&a).is_negative());
    }

    #[test]
    fn test_mul_u64() {
        let a = BigNum::from_u64(u64::MAX);
        let c = a.mul_u64(3);
        assert_eq!(c, a.add(&a).add(&a));
        assert!(a.mul_u64(0).is_zero());
    }

    #[test]
    fn test_add_abs_ignores_signs() {
        let a = BigNum::read_string(10, "-5").unwrap();
        let b = BigNum::read_string(10, "-6").unwrap();
        let c = a.add_abs(&b);
        assert!(!c.is_negative());
        assert_eq!(c, BigNum::from_u64(11));
    }

    #[test]
    fn test_div_rem() {
        let a = BigNum::from_u64(100);
        let b = BigNum::from_u64(7);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, BigNum::from_u64(14));
        assert_eq!(r, BigNum::from_u64(2));
    }

    #[test]
    fn test_div_rem_multi_limb() {
        let a = BigNum::read_string(16, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF").unwrap();
        let b = BigNum::read_string(16, "FFFFFFFFFFFFFFFF").unwrap();
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(a, q.mul(&b).add(&r));
        assert!(r.cmp_abs(&b) == std::cmp::Ordering::Less);
    }

    #[test]
    fn test_div_by_zero() {
        let a = BigNum::from_u64(100);
        assert!(a.div_rem(&BigNum::zero()).is_err());
        assert!(a.mod_reduce(&BigNum::zero()).is_err());
    }

    #[test]
    fn test_mod_reduce_positive() {
        let a = BigNum::from_u64(1000);
        let m = BigNum::from_u64(97);
        assert_eq!(a.mod_reduce(&m).unwrap(), BigNum::from_u64(1000 % 97));
    }

    #[test]
    fn test_mod_reduce_negative_is_euclidean() {
        let a = BigNum::read_string(10, "-5").unwrap();
        let m = BigNum::from_u64(7);
        // -5 mod 7 = 2
        assert_eq!(a.mod_reduce(&m).unwrap(), BigNum::from_u64(2));

        let b = BigNum::read_string(10, "-14").unwrap();
        assert!(b.mod_reduce(&m).unwrap().is_zero());
    }

    #[test]
    fn test_cmp_abs() {
        let a = BigNum::from_u64(100);
        let mut b = BigNum::from_u64(200);
        b.set_negative(true);
        assert_eq!(a.cmp_abs(&b), std::cmp::Ordering::Less);
    }
}
