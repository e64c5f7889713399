use crate::error::{Result, SemanticError};
use std::fmt;

/// Size of one SHA1 piece checksum
pub const PIECE_HASH_LEN: usize = 20;

/// A 20-byte SHA1 hash representing a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceHash([u8; PIECE_HASH_LEN]);

impl PieceHash {
    pub fn as_bytes(&self) -> &[u8; PIECE_HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PieceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Split concatenated checksums into consecutive 20-byte hashes.
///
/// The caller guarantees `pieces.len()` is a multiple of 20; see
/// [`Pieces::from_bytes`] for the checked form.
pub fn split_pieces(pieces: &[u8]) -> Vec<PieceHash> {
    debug_assert_eq!(pieces.len() % PIECE_HASH_LEN, 0);

    pieces
        .chunks_exact(PIECE_HASH_LEN)
        .map(|chunk| {
            let mut hash = [0u8; PIECE_HASH_LEN];
            hash.copy_from_slice(chunk);
            PieceHash(hash)
        })
        .collect()
}

/// Collection of piece hashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pieces {
    hashes: Vec<PieceHash>,
}

impl Pieces {
    /// Parse pieces from concatenated SHA1 hashes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() % PIECE_HASH_LEN != 0 {
            return Err(SemanticError::InvalidPieceTableLength(data.len()).into());
        }

        Ok(Self {
            hashes: split_pieces(data),
        })
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PieceHash> {
        self.hashes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceHash> {
        self.hashes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BittorrentError;

    #[test]
    fn test_split_pieces_in_order() {
        let mut data = vec![0xaa; 20];
        data.extend_from_slice(&[0xbb; 20]);

        let hashes = split_pieces(&data);
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes[0].as_bytes(), &[0xaa; 20]);
        assert_eq!(hashes[1].as_bytes(), &[0xbb; 20]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_pieces(&[]).is_empty());
        assert!(Pieces::from_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_pieces_rejects_partial_hash() {
        let err = Pieces::from_bytes(&[0u8; 41]).unwrap_err();
        assert!(matches!(
            err,
            BittorrentError::Semantic(SemanticError::InvalidPieceTableLength(41))
        ));
    }

    #[test]
    fn test_piece_hash_hex() {
        let data: Vec<u8> = (0u8..20).collect();
        let pieces = Pieces::from_bytes(&data).unwrap();
        assert_eq!(
            pieces.get(0).map(PieceHash::to_hex).as_deref(),
            Some("000102030405060708090a0b0c0d0e0f10111213")
        );
        assert_eq!(pieces.get(1), None);
        assert_eq!(
            pieces.get(0).map(|p| p.to_string()),
            pieces.get(0).map(PieceHash::to_hex)
        );
    }
}
