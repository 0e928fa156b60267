//! TLS session records and the server-side session cache.

mod cache;

pub use cache::{SessionCache, DEFAULT_MAX_ENTRIES, DEFAULT_TIMEOUT};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a TLS master secret in bytes.
pub const MASTER_SECRET_LEN: usize = 48;

/// A negotiated TLS session, the unit stored in the session cache.
///
/// The master secret is zeroized when the session is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TlsSession {
    /// Session identifier (up to 32 bytes).
    pub id: Vec<u8>,
    /// Negotiated ciphersuite identifier.
    pub ciphersuite: u16,
    /// Negotiated compression method.
    pub compression: u8,
    /// The master secret.
    pub master: [u8; MASTER_SECRET_LEN],
    /// Peer certificate, if the handshake produced one. Never stored in
    /// the cache.
    pub peer_cert: Option<Vec<u8>>,
}

impl TlsSession {
    /// Create a session record.
    pub fn new(id: &[u8], ciphersuite: u16, compression: u8, master: [u8; MASTER_SECRET_LEN]) -> Self {
        TlsSession {
            id: id.to_vec(),
            ciphersuite,
            compression,
            master,
            peer_cert: None,
        }
    }
}

impl std::fmt::Debug for TlsSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The master secret stays out of debug output.
        f.debug_struct("TlsSession")
            .field("id", &self.id)
            .field("ciphersuite", &self.ciphersuite)
            .field("compression", &self.compression)
            .field("peer_cert", &self.peer_cert.as_ref().map(|c| c.len()))
            .finish()
    }
}
