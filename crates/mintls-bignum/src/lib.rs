#![doc = "Multi-precision integer arithmetic library for mintls."]

mod bignum;
mod ct;
mod gcd;
mod ops;

pub use bignum::{BigNum, Limb, LIMB_BITS};
