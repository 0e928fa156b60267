//! Elliptic curve arithmetic over GF(p).
//!
//! Implements the group operations on the NIST short Weierstrass curves
//! (y² = x³ - 3x + b mod p): point addition, doubling, and scalar
//! multiplication. Callers work with affine points; internally all
//! arithmetic runs in Jacobian coordinates modulo the group prime, with the
//! group's reduction strategy applied after every field operation.
//!
//! The scalar-multiplication ladder executes the same sequence of point
//! operations for every scalar bit and selects its result by a masked copy,
//! giving SPA resistance at the point-operation level. The big-number layer
//! underneath is not constant-time.
//!
//! References: SEC 1, GECC (Hankerson-Menezes-Vanstone), FIPS 186-3.

mod curves;
mod jacobian;
mod reduce;

use mintls_bignum::BigNum;
use mintls_types::{CryptoError, EcpCurveId};
use subtle::Choice;

use jacobian::{add_mixed, double_jac, jac_to_aff, JacobianPoint};
use reduce::{mod_p521, FastReduction};

/// A point on an elliptic curve, in affine coordinates.
///
/// The point at infinity is a distinguished state; its coordinates are
/// meaningless and held at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcpPoint {
    x: BigNum,
    y: BigNum,
    zero: bool,
}

impl EcpPoint {
    /// The point at infinity (group identity).
    pub fn zero() -> Self {
        EcpPoint {
            x: BigNum::zero(),
            y: BigNum::zero(),
            zero: true,
        }
    }

    /// Create a non-zero point from affine coordinates.
    ///
    /// Coordinates are not checked against any curve equation; membership
    /// is the caller's concern.
    pub fn from_coords(x: BigNum, y: BigNum) -> Self {
        EcpPoint { x, y, zero: false }
    }

    /// Import a non-zero point from ASCII coordinate strings.
    pub fn read_string(radix: u32, x: &str, y: &str) -> Result<Self, CryptoError> {
        Ok(Self::from_coords(
            BigNum::read_string(radix, x)?,
            BigNum::read_string(radix, y)?,
        ))
    }

    /// True for the point at infinity.
    pub fn is_zero(&self) -> bool {
        self.zero
    }

    /// Reset to the point at infinity, releasing the coordinates.
    pub fn set_zero(&mut self) {
        self.x = BigNum::zero();
        self.y = BigNum::zero();
        self.zero = true;
    }

    /// The affine X coordinate (zero for the point at infinity).
    pub fn x(&self) -> &BigNum {
        &self.x
    }

    /// The affine Y coordinate (zero for the point at infinity).
    pub fn y(&self) -> &BigNum {
        &self.y
    }
}

/// An elliptic curve group: the field prime, curve constant, base point,
/// and subgroup order. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct EcpGroup {
    p: BigNum,
    b: BigNum,
    g: EcpPoint,
    n: BigNum,
    pbits: usize,
    reduction: FastReduction,
}

impl EcpGroup {
    /// Construct a group from well-known domain parameters.
    ///
    /// P-521 is tagged with its fast-reduction routine; the other curves
    /// reduce generically.
    pub fn new(id: EcpCurveId) -> Result<Self, CryptoError> {
        let data = curves::curve_data(id);
        let mut grp = Self::read_string(16, data.p, data.b, data.gx, data.gy, data.n)?;
        if id == EcpCurveId::Secp521r1 {
            grp.reduction = FastReduction::P521;
        }
        Ok(grp)
    }

    /// Import a group from ASCII parameter strings. The reduction strategy
    /// is the generic one.
    pub fn read_string(
        radix: u32,
        p: &str,
        b: &str,
        gx: &str,
        gy: &str,
        n: &str,
    ) -> Result<Self, CryptoError> {
        let p = BigNum::read_string(radix, p)?;
        let pbits = p.bit_len();
        Ok(EcpGroup {
            p,
            b: BigNum::read_string(radix, b)?,
            g: EcpPoint::read_string(radix, gx, gy)?,
            n: BigNum::read_string(radix, n)?,
            pbits,
            reduction: FastReduction::Generic,
        })
    }

    /// The field prime p.
    pub fn prime(&self) -> &BigNum {
        &self.p
    }

    /// The curve constant b.
    pub fn curve_b(&self) -> &BigNum {
        &self.b
    }

    /// The base point G.
    pub fn generator(&self) -> &EcpPoint {
        &self.g
    }

    /// The order of the base point.
    pub fn order(&self) -> &BigNum {
        &self.n
    }

    /// Bit length of the field prime.
    pub fn pbits(&self) -> usize {
        self.pbits
    }

    /// Check whether a point satisfies y² ≡ x³ - 3x + b (mod p). The point
    /// at infinity counts as on-curve.
    pub fn contains(&self, point: &EcpPoint) -> bool {
        if point.is_zero() {
            return true;
        }
        let Ok(lhs) = point.y.mul(&point.y).mod_reduce(&self.p) else {
            return false;
        };
        let x3 = point.x.mul(&point.x).mul(&point.x);
        let Ok(rhs) = x3
            .sub(&point.x.mul_u64(3))
            .add(&self.b)
            .mod_reduce(&self.p)
        else {
            return false;
        };
        lhs == rhs
    }

    /// Addition R = P + Q of affine points.
    ///
    /// P is lifted to Jacobian coordinates, added to the affine Q with the
    /// mixed formula, and the result projected back.
    pub fn add(&self, p: &EcpPoint, q: &EcpPoint) -> Result<EcpPoint, CryptoError> {
        let j = JacobianPoint::from_affine(p);
        let j = add_mixed(self, &j, q)?;
        jac_to_aff(self, &j)
    }

    /// Scalar multiplication R = k * P (GECC 5.7, SPA-resistant variant).
    ///
    /// Runs a double-and-add-always ladder over the bits of k: both the
    /// doubling and the addition happen on every bit, and the surviving
    /// value is picked by a masked coordinate copy. The scalar must be
    /// non-negative; k = 0 yields the point at infinity.
    pub fn mul(&self, k: &BigNum, p: &EcpPoint) -> Result<EcpPoint, CryptoError> {
        if k.is_negative() {
            return Err(CryptoError::InvalidArg);
        }
        if k.is_zero() {
            return Ok(EcpPoint::zero());
        }

        let mut q0 = JacobianPoint::infinity();

        for pos in (0..k.bit_len()).rev() {
            q0 = double_jac(self, &q0)?;
            let q1 = add_mixed(self, &q0, p)?;

            let bit = Choice::from(k.get_bit(pos));
            q0 = JacobianPoint {
                x: BigNum::ct_select(&q0.x, &q1.x, bit),
                y: BigNum::ct_select(&q0.y, &q1.y, bit),
                z: BigNum::ct_select(&q0.z, &q1.z, bit),
            };
        }

        jac_to_aff(self, &q0)
    }

    /// Reduce a field element after a multiplication, applying the group's
    /// fast path when one is installed.
    ///
    /// The fast paths require `0 <= N < 2^(2*pbits)` and leave at most
    /// pbits + 1 bits, possibly negative; the trim loops below finish the
    /// reduction.
    fn modp(&self, n: BigNum) -> Result<BigNum, CryptoError> {
        match self.reduction {
            FastReduction::Generic => n.mod_reduce(&self.p),
            FastReduction::P521 => {
                if n.is_negative() || n.bit_len() > 2 * self.pbits {
                    return Err(CryptoError::EcpGeneric);
                }
                let mut n = mod_p521(&n);
                while n.is_negative() {
                    n = n.add(&self.p);
                }
                while n.cmp_abs(&self.p) != std::cmp::Ordering::Less {
                    n = n.sub(&self.p);
                }
                Ok(n)
            }
        }
    }

    /// Multiply two field elements and reduce into [0, p).
    pub(crate) fn mul_mod(&self, a: &BigNum, b: &BigNum) -> Result<BigNum, CryptoError> {
        self.modp(a.mul(b))
    }

    /// Subtract field elements; the difference is trimmed back into [0, p)
    /// by adding p while negative.
    pub(crate) fn sub_mod(&self, a: &BigNum, b: &BigNum) -> BigNum {
        let mut n = a.sub(b);
        while n.is_negative() {
            n = n.add(&self.p);
        }
        n
    }

    /// Add field elements; the sum is trimmed back into [0, p) by
    /// subtracting p while too large.
    pub(crate) fn add_mod(&self, a: &BigNum, b: &BigNum) -> BigNum {
        self.trim_high(a.add(b))
    }

    /// Multiply a field element by a small integer and trim into [0, p).
    pub(crate) fn mul_u64_mod(&self, a: &BigNum, k: u64) -> BigNum {
        self.trim_high(a.mul_u64(k))
    }

    /// Double a field element (shift left by one) and trim into [0, p).
    pub(crate) fn double_mod(&self, a: &BigNum) -> BigNum {
        self.trim_high(a.shift_left(1))
    }

    /// Halve a field element: odd values first gain p (p is odd, so the sum
    /// is even), then shift right. No further reduction is needed.
    pub(crate) fn half_mod(&self, a: BigNum) -> BigNum {
        let even = if a.get_bit(0) == 1 { a.add(&self.p) } else { a };
        even.shift_right(1)
    }

    fn trim_high(&self, mut n: BigNum) -> BigNum {
        while n.cmp_abs(&self.p) != std::cmp::Ordering::Less {
            n = n.sub(&self.p);
        }
        n
    }
}
