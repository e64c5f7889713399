use super::Peer;
use crate::bencode::{decode_all, BencodeValue};
use crate::error::{BittorrentError, Result, SemanticError};
use std::collections::BTreeMap;

/// Response from a tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerResponse {
    /// Interval in seconds to wait before next request (optional)
    pub interval: Option<u64>,
    /// Minimum announce interval (optional)
    pub min_interval: Option<u64>,
    /// Tracker ID (optional)
    pub tracker_id: Option<String>,
    /// Number of seeders (optional)
    pub complete: Option<u64>,
    /// Number of leechers (optional)
    pub incomplete: Option<u64>,
    /// List of peers, in the order the tracker sent them
    pub peers: Vec<Peer>,
}

/// Decode a full tracker reply body
pub fn parse_tracker_response(buffer: &[u8]) -> Result<TrackerResponse> {
    let value = decode_all(buffer)?;
    TrackerResponse::from_bencode(&value)
}

impl TrackerResponse {
    pub fn from_bencode(value: &BencodeValue) -> Result<Self> {
        let dict = value
            .as_dict()
            .ok_or_else(|| SemanticError::WrongType("response".to_string()))?;

        // A failure reason means the tracker rejected us; nothing else is valid
        if let Some(failure) = dict.get(b"failure reason".as_ref()) {
            let reason = failure
                .as_bytes()
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_else(|| "Unknown failure".to_string());
            return Err(BittorrentError::TrackerFailureReason(reason));
        }

        let tracker_id = dict
            .get(b"tracker id".as_ref())
            .and_then(|v| v.as_str())
            .map(String::from);

        let peers = match dict.get(b"peers".as_ref()) {
            Some(BencodeValue::ByteString(compact)) => Peer::from_compact_list(compact)?,
            Some(_) => return Err(SemanticError::WrongType("peers".to_string()).into()),
            None => return Err(SemanticError::MissingField("peers".to_string()).into()),
        };

        Ok(TrackerResponse {
            interval: optional_u64(dict, b"interval"),
            min_interval: optional_u64(dict, b"min interval"),
            tracker_id,
            complete: optional_u64(dict, b"complete"),
            incomplete: optional_u64(dict, b"incomplete"),
            peers,
        })
    }
}

/// Non-negative integer field; absent or mistyped values are ignored
fn optional_u64(dict: &BTreeMap<Vec<u8>, BencodeValue>, key: &[u8]) -> Option<u64> {
    dict.get(key)
        .and_then(|v| v.as_integer())
        .and_then(|i| u64::try_from(i).ok())
}
