mod metainfo;
mod piece;

pub use metainfo::{calculate_info_hash, Metainfo, TorrentInfo, TorrentSummary};
pub use piece::{split_pieces, PieceHash, Pieces, PIECE_HASH_LEN};

use crate::bencode::decode_all;
use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load and parse a .torrent file
pub async fn load_torrent_file<P: AsRef<Path>>(path: P) -> Result<Metainfo> {
    let path = path.as_ref();
    let data = fs::read(path).await?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    parse_torrent(&data)
}

/// Parse torrent data from bytes
pub fn parse_torrent(data: &[u8]) -> Result<Metainfo> {
    let value = decode_all(data)?;
    Metainfo::from_bencode(&value)
}
