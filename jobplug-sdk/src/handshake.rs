//! Handshake line
//!
//! The host learns where to connect by reading the first line the plugin
//! writes to stdout:
//!
//! ```text
//! <core version>|<protocol version>|tcp|<host:port>|grpc
//! ```
//!
//! Nothing else may be written to stdout by the runtime.

use std::fmt;
use std::io::{self, Write};
use std::net::SocketAddr;

/// Version of the plugin system itself
pub const CORE_PROTOCOL_VERSION: u32 = 1;

/// Version of the job protocol spoken over the connection
pub const PROTOCOL_VERSION: u32 = 2;

pub const NETWORK: &str = "tcp";

/// Transport mechanism announced to the host
pub const PROTOCOL_TYPE: &str = "grpc";

/// Connection descriptor for a bound listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    addr: SocketAddr,
}

impl Handshake {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Writes the descriptor as one line and flushes the writer
    pub fn emit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for Handshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            CORE_PROTOCOL_VERSION, PROTOCOL_VERSION, NETWORK, self.addr, PROTOCOL_TYPE
        )
    }
}
