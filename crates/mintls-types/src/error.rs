/// Cryptographic operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("null or empty input")]
    NullInput,
    #[error("memory allocation failed")]
    MemAllocFail,
    #[error("invalid argument")]
    InvalidArg,
    #[error("operation not supported")]
    NotSupported,
    #[error("invalid key")]
    InvalidKey,
    #[error("invalid iv length")]
    InvalidIvLength,

    // BigNum errors
    #[error("big number: malformed input string")]
    BnParseFail,
    #[error("big number: division by zero")]
    BnDivisionByZero,
    #[error("big number: no modular inverse")]
    BnNoInverse,

    // ECP errors
    #[error("ecp: bad input data")]
    EcpGeneric,
}
