//! Bencode codec and torrent metadata tooling.
//!
//! [`bencode`] decodes and encodes the wire format, [`torrent`] projects a
//! decoded `.torrent` file and computes its info hash, and [`tracker`]
//! builds announce requests and interprets compact tracker replies.

pub mod bencode;
pub mod client;
pub mod error;
pub mod torrent;
pub mod tracker;

pub use error::{BittorrentError, Result, SemanticError};
