//! End-to-end elliptic curve group law tests against known values.

use mintls_bignum::BigNum;
use mintls_crypto::ecp::{EcpGroup, EcpPoint};
use mintls_types::EcpCurveId;

fn group(id: EcpCurveId) -> EcpGroup {
    EcpGroup::new(id).unwrap()
}

fn hex(s: &str) -> BigNum {
    BigNum::read_string(16, s).unwrap()
}

/// P-192: 2G against the published doubling of the generator.
#[test]
fn p192_generator_doubling_known_answer() {
    let grp = group(EcpCurveId::Secp192r1);
    let r = grp
        .mul(&BigNum::from_u64(2), grp.generator())
        .unwrap();

    assert_eq!(
        r.x(),
        &hex("DAFEBF5828783F2AD35534631588A3F629A70FB16982A888")
    );
    assert_eq!(
        r.y(),
        &hex("DD6BDA0D993DA0FA46B27BBC141B868F59331AFA5C7E93AB")
    );
}

/// The group order annihilates the base point on every supported curve.
#[test]
fn order_times_generator_is_infinity() {
    for id in EcpCurveId::ALL {
        let grp = group(id);
        let r = grp.mul(grp.order(), grp.generator()).unwrap();
        assert!(r.is_zero(), "n*G != infinity on {id:?}");
    }
}

/// Scalar multiplication commutes with small scalar products (P-224).
#[test]
fn p224_scalar_linearity() {
    let grp = group(EcpCurveId::Secp224r1);
    let g = grp.generator();

    let a = BigNum::from_u64(7);
    let b = BigNum::from_u64(11);
    let ab = BigNum::from_u64(77);

    let direct = grp.mul(&ab, g).unwrap();
    let via_b_first = grp.mul(&a, &grp.mul(&b, g).unwrap()).unwrap();
    let via_a_first = grp.mul(&b, &grp.mul(&a, g).unwrap()).unwrap();

    assert_eq!(direct, via_b_first);
    assert_eq!(direct, via_a_first);
}

/// G + G through the public add equals 2G through mul (P-384).
#[test]
fn p384_add_and_double_agree() {
    let grp = group(EcpCurveId::Secp384r1);
    let g = grp.generator();

    let sum = grp.add(g, g).unwrap();
    let doubled = grp.mul(&BigNum::from_u64(2), g).unwrap();

    assert_eq!(sum.x(), doubled.x());
    assert_eq!(sum.y(), doubled.y());
}

/// A point plus its inverse is the point at infinity (P-256).
#[test]
fn p256_point_plus_inverse_is_infinity() {
    let grp = group(EcpCurveId::Secp256r1);
    let p = grp.mul(&BigNum::from_u64(5), grp.generator()).unwrap();

    let neg_y = grp.prime().sub(p.y());
    let q = EcpPoint::from_coords(p.x().clone(), neg_y);

    let r = grp.add(&p, &q).unwrap();
    assert!(r.is_zero());
}

/// Identity behavior of add and mul across representatives of the table.
#[test]
fn identity_laws() {
    for id in [EcpCurveId::Secp192r1, EcpCurveId::Secp521r1] {
        let grp = group(id);
        let g = grp.generator();
        let zero = EcpPoint::zero();

        assert_eq!(&grp.add(g, &zero).unwrap(), g, "{id:?}");
        assert_eq!(&grp.add(&zero, g).unwrap(), g, "{id:?}");
        assert!(grp.mul(&BigNum::zero(), g).unwrap().is_zero(), "{id:?}");
    }
}

/// A single-bit scalar exercises the ladder's first-iteration seeding.
#[test]
fn one_times_point_is_point() {
    for id in EcpCurveId::ALL {
        let grp = group(id);
        let r = grp.mul(&BigNum::from_u64(1), grp.generator()).unwrap();
        assert_eq!(&r, grp.generator(), "{id:?}");
    }
}

/// Every result of the public operations is on the curve and fully reduced.
#[test]
fn results_on_curve_and_reduced() {
    let grp = group(EcpCurveId::Secp521r1);
    let g = grp.generator();

    let mut acc = EcpPoint::zero();
    for k in 1u64..=6 {
        acc = grp.add(&acc, g).unwrap();
        let ladder = grp.mul(&BigNum::from_u64(k), g).unwrap();
        assert_eq!(acc, ladder, "k = {k}");
        assert!(grp.contains(&acc));
        assert!(acc.x().cmp_abs(grp.prime()) == std::cmp::Ordering::Less);
        assert!(acc.y().cmp_abs(grp.prime()) == std::cmp::Ordering::Less);
    }
}

/// Repeated addition walks the same orbit as the ladder on a mid-size
/// scalar with a mixed bit pattern.
#[test]
fn p256_ladder_matches_repeated_addition() {
    let grp = group(EcpCurveId::Secp256r1);
    let g = grp.generator();

    // 0b101101 = 45
    let ladder = grp.mul(&BigNum::from_u64(45), g).unwrap();

    let mut acc = EcpPoint::zero();
    for _ in 0..45 {
        acc = grp.add(&acc, g).unwrap();
    }
    assert_eq!(ladder, acc);
}
