//! Algorithm and parameter identifiers.

/// Named elliptic curve domain-parameter identifiers.
///
/// Only the NIST prime curves from SEC 2 / FIPS 186-3 are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcpCurveId {
    Secp192r1,
    Secp224r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

impl EcpCurveId {
    /// All supported curve identifiers, smallest field first.
    pub const ALL: [EcpCurveId; 5] = [
        EcpCurveId::Secp192r1,
        EcpCurveId::Secp224r1,
        EcpCurveId::Secp256r1,
        EcpCurveId::Secp384r1,
        EcpCurveId::Secp521r1,
    ];
}
