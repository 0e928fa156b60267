#![doc = "Cryptographic primitives for mintls: prime-field elliptic curve arithmetic and the AES block engine."]

pub mod aes;
pub mod ecp;
pub mod modes;
