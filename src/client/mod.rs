use crate::error::Result;
use crate::torrent::Metainfo;
use crate::tracker::{Peer, TrackerClient, TrackerRequest};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Peer ID sent when none is configured
pub const DEFAULT_PEER_ID: [u8; 20] = *b"00112233445566778899";

/// Configuration for the BitTorrent client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub peer_id: [u8; 20],
    pub listen_port: u16,
    /// Timeout for a whole tracker request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            peer_id: DEFAULT_PEER_ID,
            listen_port: 6881,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Entry point tying torrent loading to tracker announces
pub struct TorrentClient {
    config: ClientConfig,
}

impl TorrentClient {
    pub fn new(config: ClientConfig) -> Self {
        info!(
            "Client initialized with peer_id: {}",
            String::from_utf8_lossy(&config.peer_id)
        );

        Self { config }
    }

    /// Tracker request for a fresh download of `metainfo`
    pub fn tracker_request(&self, metainfo: &Metainfo) -> TrackerRequest {
        TrackerRequest::new(
            metainfo.info_hash,
            self.config.peer_id,
            self.config.listen_port,
            metainfo.info.length,
        )
    }

    /// Announce to the torrent's tracker and return its peers in order
    pub async fn peers(&self, metainfo: &Metainfo) -> Result<Vec<Peer>> {
        let tracker_client = TrackerClient::new(self.config.timeout)?;
        let request = self.tracker_request(metainfo);

        let response = tracker_client.announce(&metainfo.announce, &request).await?;
        Ok(response.peers)
    }

    /// Load a .torrent file and announce it
    pub async fn peers_for_file(&self, torrent_path: &Path) -> Result<Vec<Peer>> {
        let metainfo = crate::torrent::load_torrent_file(torrent_path).await?;
        info!("Info hash: {}", metainfo.info_hash_hex());
        self.peers(&metainfo).await
    }
}
