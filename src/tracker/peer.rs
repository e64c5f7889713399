use crate::error::{Result, SemanticError};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

/// Size of one compact peer record: 4 bytes IPv4 + 2 bytes port
pub const COMPACT_PEER_LEN: usize = 6;

/// Represents a peer in the swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peer {
    pub addr: SocketAddrV4,
}

impl Peer {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            addr: SocketAddrV4::new(ip, port),
        }
    }

    /// Parse a peer from compact format (6 bytes: 4 IP + 2 port, big-endian)
    pub fn from_compact(data: &[u8]) -> Option<Self> {
        if data.len() != COMPACT_PEER_LEN {
            return None;
        }

        let ip = Ipv4Addr::new(data[0], data[1], data[2], data[3]);
        let port = u16::from_be_bytes([data[4], data[5]]);

        Some(Self::new(ip, port))
    }

    /// Parse multiple peers from compact format, preserving order
    pub fn from_compact_list(data: &[u8]) -> Result<Vec<Self>> {
        if data.len() % COMPACT_PEER_LEN != 0 {
            return Err(SemanticError::InvalidPeerTableLength(data.len()).into());
        }

        Ok(data
            .chunks_exact(COMPACT_PEER_LEN)
            .filter_map(Self::from_compact)
            .collect())
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
