use super::Pieces;
use crate::bencode::{encode, BencodeValue};
use crate::error::{Result, SemanticError};
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

type Dict = BTreeMap<Vec<u8>, BencodeValue>;

/// Information about the torrent contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentInfo {
    /// Suggested file name, raw bytes as stored in the torrent
    pub name: Vec<u8>,
    /// Number of bytes in each piece
    pub piece_length: u64,
    /// SHA1 hashes of all pieces
    pub pieces: Pieces,
    /// Total length of the file
    pub length: u64,
}

impl TorrentInfo {
    fn from_bencode(value: &BencodeValue) -> Result<Self> {
        let dict = value
            .as_dict()
            .ok_or_else(|| SemanticError::WrongType("info".to_string()))?;

        let length = required(dict, "length", BencodeValue::as_integer)?;
        let length =
            u64::try_from(length).map_err(|_| SemanticError::OutOfRange("length".to_string()))?;

        let name = required(dict, "name", BencodeValue::as_bytes)?.to_vec();

        let piece_length = required(dict, "piece length", BencodeValue::as_integer)?;
        let piece_length = u64::try_from(piece_length)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| SemanticError::OutOfRange("piece length".to_string()))?;

        let pieces = Pieces::from_bytes(required(dict, "pieces", BencodeValue::as_bytes)?)?;

        Ok(TorrentInfo {
            name,
            piece_length,
            pieces,
            length,
        })
    }

    /// Name for display, with invalid UTF-8 replaced
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// Look up `key` and project it with `get`, distinguishing absent from mistyped
fn required<'a, T>(
    dict: &'a Dict,
    key: &str,
    get: impl FnOnce(&'a BencodeValue) -> Option<T>,
) -> Result<T> {
    let value = dict
        .get(key.as_bytes())
        .ok_or_else(|| SemanticError::MissingField(key.to_string()))?;

    get(value).ok_or_else(|| SemanticError::WrongType(key.to_string()).into())
}

/// Top-level metainfo structure from a .torrent file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metainfo {
    /// URL of the tracker, raw bytes as stored in the torrent
    pub announce: Vec<u8>,
    /// Information about the torrent contents
    pub info: TorrentInfo,
    /// SHA1 hash of the canonical encoding of the info dictionary
    pub info_hash: [u8; 20],
}

impl Metainfo {
    /// Project a decoded top-level dictionary into torrent metadata
    pub fn from_bencode(value: &BencodeValue) -> Result<Self> {
        let dict = value
            .as_dict()
            .ok_or_else(|| SemanticError::WrongType("torrent".to_string()))?;

        let announce = required(dict, "announce", BencodeValue::as_bytes)?.to_vec();

        let info_value = dict
            .get(b"info".as_ref())
            .ok_or_else(|| SemanticError::MissingField("info".to_string()))?;

        let info = TorrentInfo::from_bencode(info_value)?;
        let info_hash = calculate_info_hash(info_value);

        debug!(
            "Projected torrent '{}' with {} pieces",
            info.name_lossy(),
            info.pieces.len()
        );

        Ok(Metainfo {
            announce,
            info,
            info_hash,
        })
    }

    /// Tracker URL for display, with invalid UTF-8 replaced
    pub fn announce_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.announce)
    }

    /// Get the info hash as a hex string
    pub fn info_hash_hex(&self) -> String {
        hex::encode(self.info_hash)
    }

    /// Collect the fields shown to users
    pub fn summary(&self) -> TorrentSummary {
        TorrentSummary {
            tracker_url: self.announce_lossy().into_owned(),
            name: self.info.name_lossy().into_owned(),
            length: self.info.length,
            info_hash: self.info_hash_hex(),
            piece_length: self.info.piece_length,
            piece_hashes: self.info.pieces.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Display-ready view of a [`Metainfo`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentSummary {
    pub tracker_url: String,
    pub name: String,
    pub length: u64,
    pub info_hash: String,
    pub piece_length: u64,
    pub piece_hashes: Vec<String>,
}

/// SHA1 over the re-encoded info value.
///
/// Decoding only accepts canonical input, so this equals the hash of the
/// original bytes.
pub fn calculate_info_hash(info: &BencodeValue) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(encode(info));
    let hash = hasher.finalize();

    let mut result = [0u8; 20];
    result.copy_from_slice(&hash);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::decode_all;
    use crate::error::BittorrentError;

    const INFO: &[u8] = b"d6:lengthi92063e4:name10:sample.txt12:piece lengthi32768e6:pieces60:\
AAAAAAAAAAAAAAAAAAAABBBBBBBBBBBBBBBBBBBBCCCCCCCCCCCCCCCCCCCCe";

    fn sample_torrent() -> Vec<u8> {
        let mut data = b"d8:announce31:http://tracker.example/announce4:info".to_vec();
        data.extend_from_slice(INFO);
        data.push(b'e');
        data
    }

    fn semantic_error(data: &[u8]) -> SemanticError {
        let value = decode_all(data).unwrap();
        match Metainfo::from_bencode(&value) {
            Err(BittorrentError::Semantic(err)) => err,
            other => panic!("expected semantic error, got {:?}", other),
        }
    }

    #[test]
    fn test_project_sample() {
        let value = decode_all(&sample_torrent()).unwrap();
        let metainfo = Metainfo::from_bencode(&value).unwrap();

        assert_eq!(metainfo.announce, b"http://tracker.example/announce");
        assert_eq!(metainfo.info.length, 92063);
        assert_eq!(metainfo.info.piece_length, 32768);
        assert_eq!(metainfo.info.name, b"sample.txt");
        assert_eq!(metainfo.info.pieces.len(), 3);
        assert_eq!(metainfo.info.pieces.get(2).unwrap().as_bytes(), &[b'C'; 20]);

        // Oracle: hash the literal info bytes directly
        let expected = Sha1::digest(INFO);
        assert_eq!(metainfo.info_hash[..], expected[..]);
        assert_eq!(metainfo.info_hash_hex(), hex::encode(expected));
        assert_eq!(metainfo.info_hash_hex().len(), 40);
    }

    #[test]
    fn test_info_hash_depends_only_on_value() {
        let first = decode_all(INFO).unwrap();

        let mut pieces = vec![b'A'; 20];
        pieces.extend_from_slice(&[b'B'; 20]);
        pieces.extend_from_slice(&[b'C'; 20]);

        // Same value built in a different insertion order
        let mut built = BTreeMap::new();
        built.insert(b"pieces".to_vec(), BencodeValue::from(pieces));
        built.insert(b"piece length".to_vec(), BencodeValue::Integer(32768));
        built.insert(b"name".to_vec(), BencodeValue::from("sample.txt"));
        built.insert(b"length".to_vec(), BencodeValue::Integer(92063));
        let second = BencodeValue::Dict(built);

        assert_eq!(first, second);
        assert_eq!(calculate_info_hash(&first), calculate_info_hash(&second));

        let mut changed = first.as_dict().unwrap().clone();
        changed.insert(b"length".to_vec(), BencodeValue::Integer(92064));
        assert_ne!(
            calculate_info_hash(&first),
            calculate_info_hash(&BencodeValue::Dict(changed))
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            semantic_error(b"d4:infod6:lengthi1eee"),
            SemanticError::MissingField("announce".to_string())
        );
        assert_eq!(
            semantic_error(b"d8:announce3:urle"),
            SemanticError::MissingField("info".to_string())
        );
        assert_eq!(
            semantic_error(b"d8:announce3:url4:infod4:name1:a12:piece lengthi1e6:pieces0:ee"),
            SemanticError::MissingField("length".to_string())
        );
        assert_eq!(
            semantic_error(b"d8:announce3:url4:infod6:lengthi1e4:name1:a12:piece lengthi1eee"),
            SemanticError::MissingField("pieces".to_string())
        );
    }

    #[test]
    fn test_wrong_types() {
        assert_eq!(
            semantic_error(b"d8:announcei1e4:infodee"),
            SemanticError::WrongType("announce".to_string())
        );
        assert_eq!(
            semantic_error(b"d8:announce3:url4:infoli1eee"),
            SemanticError::WrongType("info".to_string())
        );
        assert_eq!(
            semantic_error(b"d8:announce3:url4:infod6:length1:1ee"),
            SemanticError::WrongType("length".to_string())
        );
        assert_eq!(semantic_error(b"le"), SemanticError::WrongType("torrent".to_string()));
    }

    #[test]
    fn test_non_utf8_announce_projects() {
        let value = decode_all(
            b"d8:announce4:ht\xfft4:infod6:lengthi1e4:name1:a12:piece lengthi1e6:pieces0:ee",
        )
        .unwrap();
        let metainfo = Metainfo::from_bencode(&value).unwrap();

        assert_eq!(metainfo.announce, b"ht\xfft");
        assert_eq!(metainfo.announce_lossy(), "ht\u{fffd}t");
        assert_eq!(metainfo.summary().tracker_url, "ht\u{fffd}t");
    }

    #[test]
    fn test_out_of_range_lengths() {
        assert_eq!(
            semantic_error(
                b"d8:announce3:url4:infod6:lengthi-1e4:name1:a12:piece lengthi1e6:pieces0:ee"
            ),
            SemanticError::OutOfRange("length".to_string())
        );
        assert_eq!(
            semantic_error(
                b"d8:announce3:url4:infod6:lengthi1e4:name1:a12:piece lengthi0e6:pieces0:ee"
            ),
            SemanticError::OutOfRange("piece length".to_string())
        );
    }

    #[test]
    fn test_invalid_piece_table_length() {
        assert_eq!(
            semantic_error(
                b"d8:announce3:url4:infod6:lengthi1e4:name1:a12:piece lengthi1e6:pieces3:abcee"
            ),
            SemanticError::InvalidPieceTableLength(3)
        );
    }

    #[test]
    fn test_summary() {
        let value = decode_all(&sample_torrent()).unwrap();
        let summary = Metainfo::from_bencode(&value).unwrap().summary();

        assert_eq!(summary.tracker_url, "http://tracker.example/announce");
        assert_eq!(summary.name, "sample.txt");
        assert_eq!(summary.piece_hashes.len(), 3);
        assert_eq!(summary.piece_hashes[0], hex::encode([b'A'; 20]));
    }
}
