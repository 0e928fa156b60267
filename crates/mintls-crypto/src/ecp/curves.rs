//! Domain parameter tables for the supported named curves.
//!
//! Hex strings are the standardized values from SEC 2 / FIPS 186-3. All
//! supported curves are short Weierstrass with a = -3, so only p, b, the
//! base point, and the group order are carried.

use mintls_types::EcpCurveId;

/// Standardized domain parameters for one named curve, as hex strings.
pub(crate) struct CurveData {
    pub p: &'static str,
    pub b: &'static str,
    pub gx: &'static str,
    pub gy: &'static str,
    pub n: &'static str,
}

/// NIST P-192 (secp192r1), SEC 2 §2.4.
const SECP192R1: CurveData = CurveData {
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFF",
    b: "64210519E59C80E70FA7E9AB72243049FEB8DEECC146B9B1",
    gx: "188DA80EB03090F67CBF20EB43A18800F4FF0AFD82FF1012",
    gy: "07192B95FFC8DA78631011ED6B24CDD573F977A11E794811",
    n: "FFFFFFFFFFFFFFFFFFFFFFFF99DEF836146BC9B1B4D22831",
};

/// NIST P-224 (secp224r1), SEC 2 §2.5.
const SECP224R1: CurveData = CurveData {
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF000000000000000000000001",
    b: "B4050A850C04B3ABF54132565044B0B7D7BFD8BA270B39432355FFB4",
    gx: "B70E0CBD6BB4BF7F321390B94A03C1D356C21122343280D6115C1D21",
    gy: "BD376388B5F723FB4C22DFE6CD4375A05A07476444D5819985007E34",
    n: "FFFFFFFFFFFFFFFFFFFFFFFFFFFF16A2E0B8F03E13DD29455C5C2A3D",
};

/// NIST P-256 (secp256r1), SEC 2 §2.7.
const SECP256R1: CurveData = CurveData {
    p: "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF",
    b: "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B",
    gx: "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296",
    gy: "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
    n: "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
};

/// NIST P-384 (secp384r1), SEC 2 §2.8.
const SECP384R1: CurveData = CurveData {
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFE\
        FFFFFFFF0000000000000000FFFFFFFF",
    b: "B3312FA7E23EE7E4988E056BE3F82D19181D9C6EFE8141120314088F5013875A\
        C656398D8A2ED19D2A85C8EDD3EC2AEF",
    gx: "AA87CA22BE8B05378EB1C71EF320AD746E1D3B628BA79B9859F741E082542A38\
         5502F25DBF55296C3A545E3872760AB7",
    gy: "3617DE4A96262C6F5D9E98BF9292DC29F8F41DBD289A147CE9DA3113B5F0B8C0\
         0A60B1CE1D7E819D7A431D7C90EA0E5F",
    n: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC7634D81F4372DDF\
        581A0DB248B0A77AECEC196ACCC52973",
};

/// NIST P-521 (secp521r1), SEC 2 §2.9.
const SECP521R1: CurveData = CurveData {
    p: "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF\
        FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF\
        FFFF",
    b: "0051953EB9618E1C9A1F929A21A0B68540EEA2DA725B99B315F3B8B489918EF1\
        09E156193951EC7E937B1652C0BD3BB1BF073573DF883D2C34F1EF451FD46B50\
        3F00",
    gx: "00C6858E06B70404E9CD9E3ECB662395B4429C648139053FB521F828AF606B4D\
         3DBAA14B5E77EFE75928FE1DC127A2FFA8DE3348B3C1856A429BF97E7E31C2E5\
         BD66",
    gy: "011839296A789A3BC0045C8A5FB42C7D1BD998F54449579B446817AFBD17273E\
         662C97EE72995EF42640C550B9013FAD0761353C7086A272C24088BE94769FD1\
         6650",
    n: "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF\
        FFFFFA51868783BF2F966B7FCC0148F709A5D03BB5C9B8899C47AEBB6FB71E91\
        386409",
};

/// Return the parameter table for a named curve.
pub(crate) fn curve_data(id: EcpCurveId) -> &'static CurveData {
    match id {
        EcpCurveId::Secp192r1 => &SECP192R1,
        EcpCurveId::Secp224r1 => &SECP224R1,
        EcpCurveId::Secp256r1 => &SECP256R1,
        EcpCurveId::Secp384r1 => &SECP384R1,
        EcpCurveId::Secp521r1 => &SECP521R1,
    }
}
