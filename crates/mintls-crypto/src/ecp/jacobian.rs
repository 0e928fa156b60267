//! Jacobian-coordinate point arithmetic.
//!
//! Internal format for fast addition, doubling, and multiplication:
//! (X, Y, Z) represents the affine point (X/Z², Y/Z³), and Z = 0 is the
//! point at infinity. Formulas follow GECC 3.21/3.22 for short Weierstrass
//! curves with a = -3. Every intermediate is reduced into [0, p) before the
//! next step.

use mintls_bignum::BigNum;
use mintls_types::CryptoError;

use super::{EcpGroup, EcpPoint};

/// A point in Jacobian projective coordinates.
#[derive(Clone)]
pub(crate) struct JacobianPoint {
    pub x: BigNum,
    pub y: BigNum,
    pub z: BigNum,
}

impl JacobianPoint {
    /// The point at infinity (identity element).
    pub fn infinity() -> Self {
        JacobianPoint {
            x: BigNum::from_u64(1),
            y: BigNum::from_u64(1),
            z: BigNum::zero(),
        }
    }

    /// Lift an affine point into Jacobian coordinates (Z = 1; the affine
    /// zero becomes the Jacobian infinity).
    pub fn from_affine(aff: &EcpPoint) -> Self {
        if aff.is_zero() {
            return Self::infinity();
        }
        JacobianPoint {
            x: aff.x().clone(),
            y: aff.y().clone(),
            z: BigNum::from_u64(1),
        }
    }

    /// Check if this point is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }
}

/// Project back to affine coordinates: (X/Z², Y/Z³).
///
/// The inverse of Z is taken modulo the group prime; a failure there means
/// Z ≡ 0 (ruled out above) or broken group parameters, and surfaces as the
/// underlying error.
pub(crate) fn jac_to_aff(grp: &EcpGroup, jac: &JacobianPoint) -> Result<EcpPoint, CryptoError> {
    if jac.is_infinity() {
        return Ok(EcpPoint::zero());
    }

    let zi = jac.z.mod_inv(grp.prime())?;
    let zzi = grp.mul_mod(&zi, &zi)?;

    let x = grp.mul_mod(&jac.x, &zzi)?;
    let y = grp.mul_mod(&jac.y, &zzi)?;
    let y = grp.mul_mod(&y, &zi)?;

    Ok(EcpPoint::from_coords(x, y))
}

/// Point doubling R = 2 P (GECC 3.21).
pub(crate) fn double_jac(grp: &EcpGroup, p: &JacobianPoint) -> Result<JacobianPoint, CryptoError> {
    if p.is_infinity() {
        return Ok(JacobianPoint::infinity());
    }

    let t1 = grp.mul_mod(&p.z, &p.z)?; // Z²
    let t2 = grp.sub_mod(&p.x, &t1); // X - Z²
    let t1 = grp.add_mod(&p.x, &t1); // X + Z²
    let t2 = grp.mul_mod(&t2, &t1)?;
    let t2 = grp.mul_u64_mod(&t2, 3); // M = 3 (X² - Z⁴)

    let y = grp.double_mod(&p.y); // 2 Y
    let z = grp.mul_mod(&y, &p.z)?; // Z' = 2 Y Z
    let y = grp.mul_mod(&y, &y)?; // 4 Y²
    let t3 = grp.mul_mod(&y, &p.x)?; // S = 4 X Y²
    let y = grp.mul_mod(&y, &y)?; // 16 Y⁴
    let y = grp.half_mod(y); // 8 Y⁴

    let x = grp.mul_mod(&t2, &t2)?; // M²
    let t1 = grp.double_mod(&t3); // 2 S
    let x = grp.sub_mod(&x, &t1); // X' = M² - 2 S
    let t1 = grp.sub_mod(&t3, &x); // S - X'
    let t1 = grp.mul_mod(&t1, &t2)?;
    let y = grp.sub_mod(&t1, &y); // Y' = M (S - X') - 8 Y⁴

    Ok(JacobianPoint { x, y, z })
}

/// Mixed addition R = P + Q with P Jacobian and Q affine (GECC 3.22).
///
/// Keeping one operand affine saves three field multiplications per
/// addition; the scalar-multiplication ladder always adds the fixed base
/// point, which stays affine throughout.
pub(crate) fn add_mixed(
    grp: &EcpGroup,
    p: &JacobianPoint,
    q: &EcpPoint,
) -> Result<JacobianPoint, CryptoError> {
    // Trivial cases: P == 0 or Q == 0
    if p.is_infinity() {
        return Ok(JacobianPoint::from_affine(q));
    }
    if q.is_zero() {
        return Ok(p.clone());
    }

    let t1 = grp.mul_mod(&p.z, &p.z)?; // Z²
    let t2 = grp.mul_mod(&t1, &p.z)?; // Z³
    let t1 = grp.mul_mod(&t1, q.x())?; // U2 = Q.X Z²
    let t2 = grp.mul_mod(&t2, q.y())?; // S2 = Q.Y Z³
    let t1 = grp.sub_mod(&t1, &p.x); // H = U2 - X
    let t2 = grp.sub_mod(&t2, &p.y); // r = S2 - Y

    if t1.is_zero() {
        if t2.is_zero() {
            // Same point: dispatch to the doubling formula.
            return double_jac(grp, p);
        }
        // Inverse points: the sum is the point at infinity.
        return Ok(JacobianPoint::infinity());
    }

    let z = grp.mul_mod(&p.z, &t1)?; // Z' = Z H
    let t3 = grp.mul_mod(&t1, &t1)?; // H²
    let t4 = grp.mul_mod(&t3, &t1)?; // H³
    let t3 = grp.mul_mod(&t3, &p.x)?; // X H²
    let t1 = grp.mul_u64_mod(&t3, 2); // 2 X H²
    let x = grp.mul_mod(&t2, &t2)?; // r²
    let x = grp.sub_mod(&x, &t1);
    let x = grp.sub_mod(&x, &t4); // X' = r² - 2 X H² - H³
    let t3 = grp.sub_mod(&t3, &x); // X H² - X'
    let t3 = grp.mul_mod(&t3, &t2)?;
    let t4 = grp.mul_mod(&t4, &p.y)?; // Y H³
    let y = grp.sub_mod(&t3, &t4); // Y' = r (X H² - X') - Y H³

    Ok(JacobianPoint { x, y, z })
}
