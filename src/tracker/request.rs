use crate::error::{BittorrentError, Result};
use url::Url;

/// Request parameters for tracker communication
#[derive(Debug, Clone)]
pub struct TrackerRequest {
    /// SHA1 hash of the info dictionary
    pub info_hash: [u8; 20],
    /// Unique peer ID
    pub peer_id: [u8; 20],
    /// Port this peer is listening on
    pub port: u16,
    /// Total amount uploaded
    pub uploaded: u64,
    /// Total amount downloaded
    pub downloaded: u64,
    /// Number of bytes left to download
    pub left: u64,
    /// Request compact peer list format
    pub compact: bool,
}

impl TrackerRequest {
    pub fn new(info_hash: [u8; 20], peer_id: [u8; 20], port: u16, left: u64) -> Self {
        Self {
            info_hash,
            peer_id,
            port,
            uploaded: 0,
            downloaded: 0,
            left,
            compact: true,
        }
    }

    /// Build query parameters, values already percent-encoded
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("info_hash", urlencoded_bytes(&self.info_hash)),
            ("peer_id", urlencoded_bytes(&self.peer_id)),
            ("port", self.port.to_string()),
            ("uploaded", self.uploaded.to_string()),
            ("downloaded", self.downloaded.to_string()),
            ("left", self.left.to_string()),
            ("compact", if self.compact { "1" } else { "0" }.to_string()),
        ]
    }

    /// Full announce URL with this request's parameters appended
    pub fn announce_url(&self, announce: &[u8]) -> Result<Url> {
        let announce = std::str::from_utf8(announce).map_err(|_| {
            BittorrentError::UrlParseError("announce URL is not valid UTF-8".to_string())
        })?;
        let mut url = Url::parse(announce)?;

        let params = self
            .to_query_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, params),
            _ => params,
        };
        url.set_query(Some(&query));

        Ok(url)
    }
}

/// URL-encode raw bytes for tracker requests.
///
/// Every byte is escaped; `Url`'s own serializer would re-encode the `%`.
fn urlencoded_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("%{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TrackerRequest {
        let mut info_hash = [0u8; 20];
        info_hash[0] = 0xd6;
        info_hash[19] = 0x20;
        TrackerRequest::new(info_hash, *b"00112233445566778899", 6881, 92063)
    }

    #[test]
    fn test_query_params() {
        let params = request().to_query_params();
        let keys: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["info_hash", "peer_id", "port", "uploaded", "downloaded", "left", "compact"]
        );
        assert!(params[0].1.starts_with("%d6%00"));
        assert!(params[0].1.ends_with("%00%20"));
        assert_eq!(params[0].1.len(), 60);
        assert_eq!(params[1].1, "%30%30%31%31%32%32%33%33%34%34%35%35%36%36%37%37%38%38%39%39");
        assert_eq!(params[5].1, "92063");
        assert_eq!(params[6].1, "1");
    }

    #[test]
    fn test_announce_url() {
        let url = request()
            .announce_url(b"http://tracker.example/announce")
            .unwrap();
        let query = url.query().unwrap();

        assert_eq!(url.path(), "/announce");
        assert!(query.starts_with("info_hash=%d6%00"));
        assert!(query.contains("&port=6881&uploaded=0&downloaded=0&left=92063&compact=1"));
    }

    #[test]
    fn test_announce_url_keeps_existing_query() {
        let url = request()
            .announce_url(b"http://tracker.example/announce?passkey=abc")
            .unwrap();
        assert!(url.query().unwrap().starts_with("passkey=abc&info_hash="));
    }

    #[test]
    fn test_announce_url_rejects_garbage() {
        assert!(matches!(
            request().announce_url(b"not a url"),
            Err(BittorrentError::UrlParseError(_))
        ));
    }

    #[test]
    fn test_announce_url_rejects_non_utf8() {
        assert!(matches!(
            request().announce_url(b"http://tracker\xff/announce"),
            Err(BittorrentError::UrlParseError(_))
        ));
    }
}
