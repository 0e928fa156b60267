#![forbid(unsafe_code)]
#![doc = "TLS session management for mintls."]

pub mod session;

pub use session::{SessionCache, TlsSession};
