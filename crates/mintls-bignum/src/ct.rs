//! Constant-time helpers for big numbers.
//!
//! These operations avoid data-dependent branching at the limb level. Note
//! that `BigNum` itself is not constant-time (limb counts are data
//! dependent); callers get a fixed pattern of limb operations, not full
//! timing secrecy.

use crate::bignum::BigNum;
use subtle::{Choice, ConstantTimeEq};

impl BigNum {
    /// Constant-time equality comparison.
    pub fn ct_eq(&self, other: &BigNum) -> Choice {
        let max_len = self.num_limbs().max(other.num_limbs());
        let mut result: u8 = 1;

        result &= (self.is_negative() as u8)
            .ct_eq(&(other.is_negative() as u8))
            .unwrap_u8();

        for i in 0..max_len {
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
            result &= a.ct_eq(&b).unwrap_u8();
        }

        Choice::from(result)
    }

    /// Conditional select: returns a copy of `a` if choice == 0, of `b` if
    /// choice == 1, built by masked limb operations rather than a branch.
    pub fn ct_select(a: &BigNum, b: &BigNum, choice: Choice) -> BigNum {
        let mask = (choice.unwrap_u8() as u64).wrapping_neg(); // 0 or 0xFFFF...
        let max_len = a.num_limbs().max(b.num_limbs());
        let mut limbs = vec![0u64; max_len];

        for (i, limb) in limbs.iter_mut().enumerate() {
            let av = if i < a.num_limbs() { a.limbs()[i] } else { 0 };
            let bv = if i < b.num_limbs() { b.limbs()[i] } else { 0 };
            *limb = av ^ (mask & (av ^ bv));
        }

        let neg_a = a.is_negative() as u64;
        let neg_b = b.is_negative() as u64;
        let neg = neg_a ^ (mask & (neg_a ^ neg_b));

        let mut result = BigNum::from_limbs(limbs);
        result.set_negative(neg != 0);
        result
    }
}

impl ConstantTimeEq for BigNum {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.ct_eq(other)
    }
}
