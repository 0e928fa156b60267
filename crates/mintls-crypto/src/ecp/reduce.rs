//! Curve-specific fast quasi-reduction.
//!
//! A quasi-reduction takes a product `0 <= N < 2^(2*pbits)` and returns a
//! value congruent to N mod p that fits in at most pbits + 1 bits; the
//! caller finishes the job with a bounded number of additions or
//! subtractions of p. Only P-521 ships a fast path; the other curves reduce
//! through the generic division in `mintls-bignum`.

use mintls_bignum::{BigNum, Limb, LIMB_BITS};

/// Modular-reduction strategy carried by a group.
///
/// The set of supported curves is closed, so the strategy is a tagged
/// variant rather than a function pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FastReduction {
    /// Generic reduction via division by p.
    Generic,
    /// FIPS 186-3 D.2.5 split for the P-521 Mersenne-like prime.
    P521,
}

/// Limbs needed to hold 521 bits.
const P521_SIZE_LIMBS: usize = 521 / LIMB_BITS + 1;

/// Bits of the partial top limb: 521 mod LIMB_BITS bits are kept, so the
/// mask is 0x01FF for 64-bit limbs and 0x01 for 8-bit limbs.
const P521_MASK: Limb = (1 << (521 % LIMB_BITS)) - 1;

/// Fast quasi-reduction modulo p521 (FIPS 186-3 D.2.5).
///
/// Splits `N = H * 2^521 + L` and returns `H + L`, applied once. Requires
/// `0 <= N < 2^(2*521)`; the result fits in 522 bits.
pub(crate) fn mod_p521(n: &BigNum) -> BigNum {
    if n.num_limbs() < P521_SIZE_LIMBS {
        return n.clone();
    }

    let mut low = n.limbs()[..P521_SIZE_LIMBS].to_vec();
    low[P521_SIZE_LIMBS - 1] &= P521_MASK;
    let l = BigNum::from_limbs(low);

    let h = n.shift_right(521);
    h.add_abs(&l)
}
